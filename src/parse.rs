use crate::error::Error;

/// Extract field `field_index` of the text following `prefix` in `reply`,
/// fields being separated by `divider`.
///
/// The field is read like C `atoi`: leading whitespace, an optional sign and
/// as many digits as follow. A field without leading digits reads as `0`.
pub fn parse_reply(reply: &str, prefix: &str, divider: char, field_index: usize) -> Result<i32, Error> {
    let start = reply.find(prefix).ok_or(Error::ReplyMismatch)? + prefix.len();
    let field = reply[start..]
        .split(divider)
        .nth(field_index)
        .ok_or(Error::ReplyMismatch)?;

    Ok(leading_int(field))
}

/// Text of the reply following `prefix`, if present.
pub fn after_prefix<'a>(reply: &'a str, prefix: &str) -> Option<&'a str> {
    reply.find(prefix).map(|at| &reply[at + prefix.len()..])
}

fn leading_int(field: &str) -> i32 {
    let field = field.trim_start();
    let (negative, digits) = match field.as_bytes().first() {
        Some(b'-') => (true, &field[1..]),
        Some(b'+') => (false, &field[1..]),
        _ => (false, field),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i32, |acc, d| acc.wrapping_mul(10).wrapping_add((d - b'0') as i32));

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}
