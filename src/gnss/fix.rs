/// What a [`FixValidator`] concluded from one captured byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Verdict {
    /// Nothing learned, keep capturing
    Pending,
    /// The receiver has a fix
    Fixed,
    /// The sentence carries no fix, the capture is abandoned
    Invalid,
}

/// Decides, while an RMC sentence is being captured, whether the receiver
/// has a fix.
pub trait FixValidator {
    /// A new capture starts with the byte following the sentence marker.
    fn reset(&mut self);

    fn feed(&mut self, byte: u8) -> Verdict;
}

/// Counts `A` bytes in the captured sentence, the 31st one confirming the
/// fix. Any `V` byte invalidates the sentence.
///
/// Legacy heuristic tied to the exact sentence layout. Prefer
/// [`StatusFieldValidator`] for new designs.
#[derive(Debug, Clone, Default)]
pub struct AsciiFixCounter {
    count: u8,
}

impl AsciiFixCounter {
    const THRESHOLD: u8 = 31;
}

impl FixValidator for AsciiFixCounter {
    fn reset(&mut self) {
        self.count = 0;
    }

    fn feed(&mut self, byte: u8) -> Verdict {
        match byte {
            b'V' => Verdict::Invalid,
            b'A' => {
                self.count = self.count.saturating_add(1);
                if self.count == Self::THRESHOLD {
                    Verdict::Fixed
                } else {
                    Verdict::Pending
                }
            }
            _ => Verdict::Pending,
        }
    }
}

/// Reads the RMC status field (`A` valid, `V` void).
#[derive(Debug, Clone, Default)]
pub struct StatusFieldValidator {
    field: u8,
}

impl StatusFieldValidator {
    /// Position of the status field counting the marker as field 0
    const STATUS_FIELD: u8 = 2;
}

impl FixValidator for StatusFieldValidator {
    fn reset(&mut self) {
        self.field = 0;
    }

    fn feed(&mut self, byte: u8) -> Verdict {
        if byte == b',' {
            self.field = self.field.saturating_add(1);
            return Verdict::Pending;
        }
        match (self.field == Self::STATUS_FIELD, byte) {
            (true, b'A') => Verdict::Fixed,
            (true, b'V') => Verdict::Invalid,
            _ => Verdict::Pending,
        }
    }
}
