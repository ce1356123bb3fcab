use atat::atat_derive::AtatEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum Echo {
    /// Echo mode off
    Disable = 0,
    /// (factory-programmed value): echo mode on
    Enable = 1,
}
