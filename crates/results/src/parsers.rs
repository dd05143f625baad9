// nom parser combinators
use nom::bytes::complete::{tag, take_till, take_until};
use nom::character::complete::{self, alpha1, alphanumeric1, space0, space1};
use nom::combinator::{map, rest};
use nom::multi::many1;
use nom::number::complete::double;
use nom::sequence::{preceded, separated_pair, terminated, tuple};
use nom::IResult;

/// Split `Label = value (unit)` into the label and the raw value
///
/// The value stops at the first `(`, so units are dropped.
pub(crate) fn labelled_value(i: &str) -> IResult<&str, (&str, &str)> {
    let (i, (label, value)) =
        separated_pair(take_until("="), tag("="), take_till(|c: char| c == '('))(i.trim())?;
    Ok((i, (label.trim(), value.trim())))
}

/// Split `Label is value`, as used for named properties
pub(crate) fn is_value(i: &str) -> IResult<&str, (&str, &str)> {
    let (i, (label, value)) = separated_pair(take_until(" is "), tag(" is "), rest)(i.trim())?;
    Ok((i, (label.trim(), value.trim())))
}

/// Split `Label: text` on the first colon
pub(crate) fn colon_value(i: &str) -> IResult<&str, (&str, &str)> {
    let (i, (label, value)) = separated_pair(take_until(":"), tag(":"), rest)(i.trim())?;
    Ok((i, (label.trim(), value.trim())))
}

/// List of consecutive doubles as a vector of f64 values
pub(crate) fn vector_of_f64(i: &str) -> IResult<&str, Vec<f64>> {
    many1(terminated(double, space0))(i.trim_start())
}

/// A whole line of doubles, nothing else allowed
pub(crate) fn row_of_f64(i: &str) -> Option<Vec<f64>> {
    match vector_of_f64(i.trim()) {
        Ok((remainder, values)) if remainder.trim().is_empty() => Some(values),
        _ => None,
    }
}

/// Index following a word, e.g. `Region 2 spectrum` gives `(" spectrum", 2)`
pub(crate) fn indexed<'a>(word: &str, i: &'a str) -> IResult<&'a str, usize> {
    let (i, index) = preceded(tuple((tag(word), space1)), complete::u64)(i.trim_start())?;
    Ok((i, index as usize))
}

/// Element of a phi-rho-z region, `symbol Z K L M`
pub(crate) fn element_flags(i: &str) -> IResult<&str, (&str, u32, [bool; 3])> {
    let (i, (symbol, _, z, k, l, m)) =
        tuple((alpha1, space1, complete::u32, flag, flag, flag))(i.trim())?;
    Ok((i, (symbol, z, [k, l, m])))
}

/// Integer switch preceded by whitespace
fn flag(i: &str) -> IResult<&str, bool> {
    map(preceded(space1, complete::u8), |f| f != 0)(i)
}

/// Reference peak, `symbol line energy`
pub(crate) fn reference_peak(i: &str) -> IResult<&str, (&str, &str, f64)> {
    let (i, (symbol, _, line, _, energy)) =
        tuple((alpha1, space1, alphanumeric1, space1, double))(i.trim())?;
    Ok((i, (symbol, line, energy)))
}

/// Characteristic peak intensity, `symbol line energy intensity`
pub(crate) fn peak_intensity(i: &str) -> IResult<&str, (&str, &str, f64, f64)> {
    let (i, (symbol, line, energy)) = reference_peak(i)?;
    let (i, intensity) = preceded(space1, double)(i)?;
    Ok((i, (symbol, line, energy, intensity)))
}

/// Count in brackets at the end of a block title, e.g. `E_Net[peak][channel](5)`
pub(crate) fn bracketed_count<'a>(title: &str, i: &'a str) -> IResult<&'a str, usize> {
    let (i, count) = preceded(
        tuple((tag(title), space0, tag("("))),
        terminated(complete::u64, tag(")")),
    )(i.trim())?;
    Ok((i, count as usize))
}
