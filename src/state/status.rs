use crate::core::{Change, ChangeListener};

/// Status line model. Subscribed to the document, so it tracks the length
/// through every mutation without being asked.
#[derive(Debug, Default)]
pub struct StatusBar {
    length: usize,
}

impl StatusBar {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn text(&self) -> String {
        format!("Length: {}", self.length)
    }
}

impl ChangeListener for StatusBar {
    fn document_changed(&mut self, change: &Change) {
        self.length = change.doc_len;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::{CharOffset, Document};

    #[test]
    fn test_tracks_document_length() {
        let mut doc = Document::new();
        let status = Rc::new(RefCell::new(StatusBar::new(doc.len_chars())));
        doc.subscribe(status.clone());
        assert_eq!(status.borrow().text(), "Length: 0");

        doc.insert(CharOffset(0), "héllo");
        assert_eq!(status.borrow().text(), "Length: 5");

        doc.remove(CharOffset(0), CharOffset(2));
        assert_eq!(status.borrow().length(), 3);

        doc.replace_all("l", "LL");
        assert_eq!(status.borrow().length(), 5);

        doc.reset();
        assert_eq!(status.borrow().text(), "Length: 0");
    }
}
