/// Extends string types with useful functions
pub trait StringExt {
    /// Capilalises the first letter in a string
    ///
    /// ```rust
    /// # use xtools_utils::StringExt;
    /// assert_eq!("test string".capitalise(), "Test string".to_string());
    /// ```
    fn capitalise(&self) -> String;

    /// Normalise an element symbol, i.e. `AL` or `al` to `Al`
    ///
    /// ```rust
    /// # use xtools_utils::StringExt;
    /// assert_eq!("MG".as_symbol(), "Mg".to_string());
    /// assert_eq!(" si ".as_symbol(), "Si".to_string());
    /// ```
    fn as_symbol(&self) -> String;
}

impl<T: AsRef<str>> StringExt for T {
    fn capitalise(&self) -> String {
        let mut c = self.as_ref().chars();
        match c.next() {
            Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
            None => String::new(),
        }
    }

    fn as_symbol(&self) -> String {
        self.as_ref().trim().to_lowercase().capitalise()
    }
}
