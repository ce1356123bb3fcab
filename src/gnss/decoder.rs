use serde::Serialize;

use crate::error::{Error, GnssError};

/// Hours between UTC and the local time reported by the decoder (UTC-6)
const UTC_OFFSET_HOURS: u8 = 6;

/// Local hour for UTC hours `0..6`, which fall on the previous local day
const EARLY_UTC_TO_LOCAL: [u8; 6] = [18, 19, 20, 21, 22, 23];

/// Last day of each month, index 0 unused. February is always 28 days.
const LAST_DAY_OF_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const KNOTS_TO_KPH: f32 = 1.852;

/// Local (UTC-6) date and time of the last decoded sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GnssTimestamp {
    pub(crate) seconds: u8,
    pub(crate) minutes: u8,
    pub(crate) hour: u8,
    pub(crate) day: u8,
    pub(crate) month: u8,
    /// Two digit year
    pub(crate) year: u8,
}

impl GnssTimestamp {
    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u8 {
        self.year
    }

    pub fn full_year(&self) -> u16 {
        2000 + self.year as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GnssFix {
    pub timestamp: GnssTimestamp,
    /// Decimal degrees, negative south
    pub latitude: f32,
    /// Decimal degrees, negative west
    pub longitude: f32,
    pub speed_kph: u16,
}

/// Decode a captured RMC sentence.
///
/// The capture starts at the last byte of the `RMC` marker, so fields are
/// `C,hhmmss[.ss],status,lat,N|S,lon,E|W,speed,track,ddmmyy,...`.
pub fn decode(sentence: &str) -> Result<GnssFix, Error> {
    let mut fields = sentence.split(',');
    let mut next = || fields.next().ok_or(Error::Gnss(GnssError::MalformedSentence));

    let _marker = next()?;
    let time = next()?;
    let _status = next()?;
    let latitude = next()?;
    let lat_hemisphere = next()?;
    let longitude = next()?;
    let lon_hemisphere = next()?;
    let speed = next()?;
    let _track = next()?;
    let date = next()?;

    let mut latitude = coordinate(latitude)?;
    match lat_hemisphere {
        "N" => {}
        "S" => latitude = -latitude,
        _ => return Err(GnssError::MalformedSentence.into()),
    }
    let mut longitude = coordinate(longitude)?;
    match lon_hemisphere {
        "E" => {}
        "W" => longitude = -longitude,
        _ => return Err(GnssError::MalformedSentence.into()),
    }

    let speed_kph = if speed.is_empty() {
        0
    } else {
        let knots: f32 = speed.parse().map_err(|_| GnssError::MalformedSentence)?;
        (knots * KNOTS_TO_KPH) as u16
    };

    Ok(GnssFix {
        timestamp: local_timestamp(time, date)?,
        latitude,
        longitude,
        speed_kph,
    })
}

/// `dddmm.mmmm` to decimal degrees
fn coordinate(raw: &str) -> Result<f32, Error> {
    let value: f64 = raw.parse().map_err(|_| GnssError::MalformedSentence)?;
    if !value.is_finite() || value < 0.0 {
        return Err(GnssError::MalformedSentence.into());
    }
    let degrees = (value / 100.0) as u32 as f64;
    let minutes = value - 100.0 * degrees;
    Ok((degrees + minutes / 60.0) as f32)
}

fn two_digits(raw: &str, at: usize) -> Result<u8, Error> {
    raw.get(at..at + 2)
        .filter(|pair| pair.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|pair| pair.parse().ok())
        .ok_or(GnssError::MalformedSentence.into())
}

fn local_timestamp(time: &str, date: &str) -> Result<GnssTimestamp, Error> {
    let mut hour = two_digits(time, 0)?;
    let minutes = two_digits(time, 2)?;
    let seconds = two_digits(time, 4)?;
    let mut day = two_digits(date, 0)?;
    let mut month = two_digits(date, 2)?;
    let mut year = two_digits(date, 4)?;

    if hour > 23 || minutes > 59 || seconds > 60 || !(1..=12).contains(&month) {
        return Err(GnssError::MalformedSentence.into());
    }
    // Leap days are accepted
    let last_day = match month {
        2 => 29,
        m => LAST_DAY_OF_MONTH[m as usize],
    };
    if day == 0 || day > last_day {
        return Err(GnssError::MalformedSentence.into());
    }

    // The hour is rounded up on the last minute
    if minutes == 59 {
        hour = if hour < 23 { hour + 1 } else { 0 };
    }

    let previous_day = hour < UTC_OFFSET_HOURS;
    if previous_day {
        hour = EARLY_UTC_TO_LOCAL[hour as usize];
    } else {
        hour -= UTC_OFFSET_HOURS;
    }

    if previous_day {
        if day > 1 {
            day -= 1;
        } else {
            if month > 1 {
                month -= 1;
            } else {
                month = 12;
                year = if year > 0 { year - 1 } else { 99 };
            }
            day = LAST_DAY_OF_MONTH[month as usize];
        }
    }

    Ok(GnssTimestamp {
        seconds,
        minutes,
        hour,
        day,
        month,
        year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn coordinates_and_speed() {
        let fix = decode("C,123519,A,4807.038,N,01131.000,W,022.4,084.4,230394,003.1,W").unwrap();
        assert!(approx(fix.latitude, 48.1173), "{}", fix.latitude);
        assert!(approx(fix.longitude, -11.5167), "{}", fix.longitude);
        assert_eq!(fix.speed_kph, 41);
    }

    #[test]
    fn southern_eastern_hemispheres() {
        let fix = decode("C,120000.00,A,3351.000,S,15112.000,E,,,010120,,,A").unwrap();
        assert!(approx(fix.latitude, -33.85));
        assert!(approx(fix.longitude, 151.2));
        assert_eq!(fix.speed_kph, 0);
    }

    #[test]
    fn same_day_conversion() {
        let ts = decode("C,123519,A,4807.038,N,01131.000,W,022.4,084.4,230394").unwrap().timestamp;
        assert_eq!((ts.hour(), ts.minutes(), ts.seconds()), (6, 35, 19));
        assert_eq!((ts.day(), ts.month(), ts.year()), (23, 3, 94));
        assert_eq!(ts.full_year(), 2094);
    }

    #[test]
    fn early_utc_hour_falls_on_previous_day() {
        let ts = decode("C,021500,A,4807.038,N,01131.000,W,0.0,0.0,150624").unwrap().timestamp;
        assert_eq!((ts.hour(), ts.day(), ts.month()), (20, 14, 6));
    }

    #[test]
    fn first_of_march_rolls_back_to_february_28() {
        let ts = decode("C,021500,A,4807.038,N,01131.000,W,0.0,0.0,010324").unwrap().timestamp;
        assert_eq!(ts.hour(), 20);
        assert_eq!(ts.minutes(), 15);
        assert_eq!((ts.day(), ts.month(), ts.year()), (28, 2, 24));
    }

    #[test]
    fn new_year_rolls_back_a_year() {
        let ts = decode("C,000000,A,4807.038,N,01131.000,W,0.0,0.0,010125").unwrap().timestamp;
        assert_eq!((ts.hour(), ts.day(), ts.month(), ts.year()), (18, 31, 12, 24));

        let ts = decode("C,050000,A,4807.038,N,01131.000,W,0.0,0.0,010100").unwrap().timestamp;
        assert_eq!((ts.hour(), ts.day(), ts.month(), ts.year()), (23, 31, 12, 99));
    }

    #[test]
    fn last_minute_rounds_the_hour() {
        let ts = decode("C,125930,A,4807.038,N,01131.000,W,0.0,0.0,230394").unwrap().timestamp;
        assert_eq!((ts.hour(), ts.minutes()), (7, 59));

        // 05:59 rounds into 06 and stays on the same day
        let ts = decode("C,055930,A,4807.038,N,01131.000,W,0.0,0.0,230394").unwrap().timestamp;
        assert_eq!((ts.hour(), ts.day()), (0, 23));

        // 23:59 wraps to 00, which is 18 on the previous day
        let ts = decode("C,235930,A,4807.038,N,01131.000,W,0.0,0.0,230394").unwrap().timestamp;
        assert_eq!((ts.hour(), ts.day()), (18, 22));
    }

    #[test]
    fn malformed_sentences() {
        let malformed = Err(Error::Gnss(GnssError::MalformedSentence));
        // Capture abandoned on a void status
        assert_eq!(decode("C,123519,"), malformed);
        assert_eq!(decode(""), malformed);
        assert_eq!(decode("C,123519,A,4807.038,N,01131.000,W,022.4,084.4"), malformed);
        assert_eq!(decode("C,1235,A,4807.038,N,01131.000,W,022.4,084.4,230394"), malformed);
        assert_eq!(decode("C,123519,A,,N,01131.000,W,022.4,084.4,230394"), malformed);
        assert_eq!(decode("C,123519,A,4807.038,X,01131.000,W,022.4,084.4,230394"), malformed);
        assert_eq!(decode("C,123519,A,4807.038,N,01131.000,W,022.4,084.4,231394"), malformed);
    }

    #[test]
    fn non_finite_coordinates_are_malformed() {
        let malformed = Err(Error::Gnss(GnssError::MalformedSentence));
        assert_eq!(decode("C,123519,A,inf,N,NaN,W,022.4,084.4,230394"), malformed);
        assert_eq!(decode("C,123519,A,4807.038,N,NaN,W,022.4,084.4,230394"), malformed);
        assert_eq!(decode("C,123519,A,infinity,S,01131.000,W,022.4,084.4,230394"), malformed);
    }

    #[test]
    fn day_must_exist_in_its_month() {
        let malformed = Err(Error::Gnss(GnssError::MalformedSentence));
        assert_eq!(decode("C,123519,A,4807.038,N,01131.000,W,022.4,084.4,450394"), malformed);
        assert_eq!(decode("C,123519,A,4807.038,N,01131.000,W,022.4,084.4,310494"), malformed);
        assert_eq!(decode("C,123519,A,4807.038,N,01131.000,W,022.4,084.4,300224"), malformed);

        let ts = decode("C,123519,A,4807.038,N,01131.000,W,0.0,0.0,290224").unwrap().timestamp;
        assert_eq!((ts.day(), ts.month()), (29, 2));
        let ts = decode("C,123519,A,4807.038,N,01131.000,W,0.0,0.0,310124").unwrap().timestamp;
        assert_eq!((ts.day(), ts.month()), (31, 1));
    }
}
