pub(crate) trait StringExt {
    fn trim_in_place(&mut self);

    /// Collapses every run of whitespace into a single space
    /// and trims both ends.
    fn collapse_whitespace(&mut self);
}

impl StringExt for String {
    fn trim_in_place(&mut self) {
        self.truncate(self.trim_end().len());

        let start = self.len() - self.trim_start().len();
        if start > 0 {
            self.drain(..start);
        }
    }

    fn collapse_whitespace(&mut self) {
        if !self.contains(|c: char| c.is_whitespace() && c != ' ') && !self.contains("  ") {
            self.trim_in_place();
            return;
        }
        let collapsed = self.split_whitespace().collect::<Vec<_>>().join(" ");
        *self = collapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_in_place() {
        #[rustfmt::skip]
        let expected = [
            ("a   b   c", "\n \r\t \n  a   b   c \r  \n\n\t"),
            ("", "  \r\n\t  \r \n"),
            ("", ""),
            ("%123", "%123"),
            ("abc", "abc "),
            ("xyz", "\txyz"),
        ];

        for (expected, original) in expected {
            let mut owned = original.to_owned();
            owned.trim_in_place();

            assert_eq!(expected, owned);
        }
    }

    #[test]
    fn test_collapse_whitespace() {
        #[rustfmt::skip]
        let expected = [
            ("a b c", "\n \r\t \n  a   b \n  c \r  \n\n\t"),
            ("Chapter 1", " Chapter 1 "),
            ("Chapter 1", "Chapter\n\t1"),
            ("", " \n "),
            ("", ""),
        ];

        for (expected, original) in expected {
            let mut owned = original.to_owned();
            owned.collapse_whitespace();

            assert_eq!(expected, owned);
        }
    }
}
