use std::fmt::{Display, Formatter, Result as FmtResult};

/// One of a patron's two checkout positions.
///
/// The persistence layer stores slots positionally; this enum is the typed
/// name for those positions so nothing indexes into a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    /// The 1-based index the persistence layer uses for this slot.
    pub fn index(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "slot {}", self.index())
    }
}

/// A library patron and their two checkout slots.
///
/// The email is the store key and is lowercased by the constructors. Slots
/// hold canonical ISBNs only, never raw QR payloads. At most two books by
/// construction: there is nowhere to put a third.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patron {
    /// Store key; always lowercase.
    pub email: String,
    pub slot_1: Option<String>,
    pub slot_2: Option<String>,
}

impl Patron {
    pub fn new(email: impl Into<String>) -> Self {
        Self::with_books(email, None::<String>, None::<String>)
    }

    pub fn with_books<S: Into<String>>(email: impl Into<String>, slot_1: Option<S>, slot_2: Option<S>) -> Self {
        Self {
            email: email.into().to_lowercase(),
            slot_1: slot_1.map(Into::into),
            slot_2: slot_2.map(Into::into),
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::First => self.slot_1.as_deref(),
            Slot::Second => self.slot_2.as_deref(),
        }
    }

    /// Whether either slot holds this ISBN.
    pub fn holds(&self, isbn: &str) -> bool {
        self.slot_holding(isbn).is_some()
    }

    /// The slot holding this ISBN, if any.
    pub fn slot_holding(&self, isbn: &str) -> Option<Slot> {
        if self.slot_1.as_deref() == Some(isbn) {
            Some(Slot::First)
        } else if self.slot_2.as_deref() == Some(isbn) {
            Some(Slot::Second)
        } else {
            None
        }
    }

    /// The slot a checkout would fill, if any is free.
    pub fn first_empty_slot(&self) -> Option<Slot> {
        if self.slot_1.is_none() {
            Some(Slot::First)
        } else if self.slot_2.is_none() {
            Some(Slot::Second)
        } else {
            None
        }
    }

    pub fn held_count(&self) -> u8 {
        u8::from(self.slot_1.is_some()) + u8::from(self.slot_2.is_some())
    }

    /// How many more books the patron may check out.
    pub fn books_remaining(&self) -> u8 {
        2 - self.held_count()
    }

    /// The ISBNs currently held, in slot order.
    pub fn held_isbns(&self) -> impl Iterator<Item = &str> {
        self.slot_1.as_deref().into_iter().chain(self.slot_2.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_email_lowercased_on_construction() {
        let patron = Patron::new("Reader@Example.COM");
        assert_eq!(patron.email, "reader@example.com");
    }

    #[rstest]
    #[case(None, None, 2, Some(Slot::First))]
    #[case(Some("111"), None, 1, Some(Slot::Second))]
    #[case(None, Some("222"), 1, Some(Slot::First))]
    #[case(Some("111"), Some("222"), 0, None)]
    fn test_slot_accounting(
        #[case] slot_1: Option<&str>,
        #[case] slot_2: Option<&str>,
        #[case] remaining: u8,
        #[case] empty: Option<Slot>,
    ) {
        let patron = Patron::with_books("p@example.com", slot_1, slot_2);
        assert_eq!(patron.books_remaining(), remaining);
        assert_eq!(patron.first_empty_slot(), empty);
        assert_eq!(patron.held_count(), 2 - remaining);
        assert_eq!(patron.slot(Slot::First), slot_1);
        assert_eq!(patron.slot(Slot::Second), slot_2);
    }

    #[test]
    fn test_slot_holding() {
        let patron = Patron::with_books("p@example.com", Some("111"), Some("222"));
        assert_eq!(patron.slot_holding("111"), Some(Slot::First));
        assert_eq!(patron.slot_holding("222"), Some(Slot::Second));
        assert_eq!(patron.slot_holding("333"), None);
        assert!(patron.holds("111"));
        assert!(!patron.holds("333"));
    }

    #[test]
    fn test_held_isbns_in_slot_order() {
        let patron = Patron::with_books("p@example.com", Some("111"), Some("222"));
        assert_eq!(patron.held_isbns().collect::<Vec<_>>(), vec!["111", "222"]);
        let gap = Patron::with_books("p@example.com", None, Some("222"));
        assert_eq!(gap.held_isbns().collect::<Vec<_>>(), vec!["222"]);
    }
}
