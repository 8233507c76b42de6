///
#[derive(Debug)]
pub enum ValidationError {
    Empty,
    MaxLength(usize, usize),
    MinLength(usize, usize),
}

pub const TITLE_TRIMMED_MIN_LEN: usize = 3;
pub const TITLE_TRIMMED_MAX_LEN: usize = 80;

#[derive(Default, Debug)]
pub struct AddPostErrors {
    pub title: Option<ValidationError>,
    pub body: Option<ValidationError>,
}

impl AddPostErrors {
    pub fn check(&mut self, title: &str, body: &str) {
        self.title = Self::check_title(title);
        self.body = Self::check_body(body);
    }

    #[must_use]
    pub const fn has_any(&self) -> bool {
        self.title.is_some() || self.body.is_some()
    }

    fn check_title(v: &str) -> Option<ValidationError> {
        let trimmed_len = v.trim().len();

        if trimmed_len == 0 {
            Some(ValidationError::Empty)
        } else if trimmed_len < TITLE_TRIMMED_MIN_LEN {
            Some(ValidationError::MinLength(
                trimmed_len,
                TITLE_TRIMMED_MIN_LEN,
            ))
        } else if trimmed_len > TITLE_TRIMMED_MAX_LEN {
            Some(ValidationError::MaxLength(
                trimmed_len,
                TITLE_TRIMMED_MAX_LEN,
            ))
        } else {
            None
        }
    }

    fn check_body(v: &str) -> Option<ValidationError> {
        let trimmed_len = v.trim().len();

        if trimmed_len == 0 {
            Some(ValidationError::Empty)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_valid_input() {
        let mut errors = AddPostErrors::default();
        errors.check("a decent title", "some body text");

        assert!(!errors.has_any());
    }

    #[test]
    fn test_empty_title() {
        let mut errors = AddPostErrors::default();
        errors.check("   ", "some body text");

        assert!(matches!(errors.title, Some(ValidationError::Empty)));
    }

    #[test]
    fn test_short_title() {
        let mut errors = AddPostErrors::default();
        errors.check("ab", "some body text");

        assert!(matches!(
            errors.title,
            Some(ValidationError::MinLength(2, TITLE_TRIMMED_MIN_LEN))
        ));
    }

    #[test]
    fn test_empty_body() {
        let mut errors = AddPostErrors::default();
        errors.check("a decent title", "");

        assert!(matches!(errors.body, Some(ValidationError::Empty)));
    }
}
