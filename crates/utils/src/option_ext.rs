/// Display helpers for values that only exist in some schema versions
pub trait OptionExt {
    /// The contained value, or `-` when the schema version has no such value
    ///
    /// ```rust
    /// # use xtools_utils::OptionExt;
    /// let azimuthal: Option<f64> = Some(45.0);
    /// assert_eq!(azimuthal.display(), "45");
    ///
    /// let skirted: Option<u64> = None;
    /// assert_eq!(skirted.display(), "-");
    /// ```
    fn display(&self) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        self.as_ref()
            .map_or_else(|| "-".to_string(), |value| value.to_string())
    }
}
