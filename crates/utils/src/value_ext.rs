use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Better scientific number formatting
    ///
    /// The default is not very consistent for scientific in particular, so this
    /// allows easy definition.
    ///
    /// Works for anything that can be represented as scientific using the
    /// `LowerExp` trait, which is pretty much every numerical primitive.
    ///
    /// ```rust
    /// # use xtools_utils::ValueExt;
    /// let number = -1.0;
    /// assert_eq!(number.sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((1.0e-10).sci(6, 2), "1.000000e-10".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;

    /// Scientific formatting with the trailing mantissa zeros removed
    ///
    /// The exponent is always signed and padded, so `1e-5` is written as
    /// `1e-05`. This is how the simulator serialises most physical quantities
    /// in its own decks.
    ///
    /// ```rust
    /// # use xtools_utils::ValueExt;
    /// assert_eq!((1.0e-10).sci_trimmed(9, 2), "1e-10".to_string());
    /// assert_eq!((1.5e-5).sci_trimmed(9, 2), "1.5e-05".to_string());
    /// assert_eq!((2500.0).sci_trimmed(9, 2), "2.5e+03".to_string());
    /// ```
    fn sci_trimmed(&self, precision: usize, exp_pad: usize) -> String;

    /// Fixed point formatting with the trailing zeros removed
    ///
    /// At least one digit is kept after the decimal point.
    ///
    /// ```rust
    /// # use xtools_utils::ValueExt;
    /// assert_eq!((30.0).fixed_trimmed(6), "30.0".to_string());
    /// assert_eq!((0.25).fixed_trimmed(6), "0.25".to_string());
    /// assert_eq!((-4.5).fixed_trimmed(2), "-4.5".to_string());
    /// ```
    fn fixed_trimmed(&self, precision: usize) -> String;
}

impl<T: std::fmt::LowerExp + std::fmt::Display> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let num = f!("{:.precision$e}", &self, precision = precision);
        let (mantissa, exp) = split_exponent(&num);
        f!("{mantissa}{}", pad_exponent(exp, exp_pad))
    }

    fn sci_trimmed(&self, precision: usize, exp_pad: usize) -> String {
        let num = f!("{:.precision$e}", &self, precision = precision);
        let (mantissa, exp) = split_exponent(&num);
        f!("{}{}", trim_zeros(mantissa), pad_exponent(exp, exp_pad))
    }

    fn fixed_trimmed(&self, precision: usize) -> String {
        let num = f!("{:.precision$}", &self, precision = precision);
        if !num.contains('.') {
            return num;
        }
        let trimmed = trim_zeros(&num);
        match trimmed.contains('.') {
            true => trimmed.to_string(),
            false => f!("{trimmed}.0"),
        }
    }
}

/// Split `1.0e-5` into `("1.0", "e-5")`, the exponent may be empty
fn split_exponent(num: &str) -> (&str, &str) {
    match num.find(['e', 'E']) {
        Some(index) => num.split_at(index),
        None => (num, ""),
    }
}

/// Make sure the exponent is signed and padded with zeros if needed
fn pad_exponent(exp: &str, exp_pad: usize) -> String {
    if exp.is_empty() {
        return String::new();
    }
    let (sign, digits) = match exp[1..].strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exp[1..].trim_start_matches('+')),
    };
    f!("e{}{:0>pad$}", sign, digits, pad = exp_pad)
}

/// Strip trailing zeros after a decimal point, and the point if left dangling
fn trim_zeros(num: &str) -> &str {
    if !num.contains('.') {
        return num;
    }
    num.trim_end_matches('0').trim_end_matches('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_padding() {
        assert_eq!(pad_exponent("e-5", 2), "e-05");
        assert_eq!(pad_exponent("e5", 2), "e+05");
        assert_eq!(pad_exponent("e-123", 2), "e-123");
        assert_eq!(pad_exponent("", 2), "");
    }

    #[test]
    fn trimmed_formats() {
        assert_eq!((1.0).sci_trimmed(9, 2), "1e+00");
        assert_eq!((0.0).sci_trimmed(9, 2), "0e+00");
        assert_eq!((-1.25e-7).sci_trimmed(9, 2), "-1.25e-07");
        assert_eq!((100.0).fixed_trimmed(6), "100.0");
        assert_eq!((5.0).fixed_trimmed(0), "5");
    }
}
