//! Photo lightbox: one enlarged photo at a time, wrapping at both ends.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Photo {
    /// Image URL or path.
    pub src: String,
    /// Shown under the enlarged photo.
    #[serde(default)]
    pub caption: String,
}

#[derive(Debug, Clone)]
pub struct Lightbox {
    photos: Vec<Photo>,
    current: usize,
    open: bool,
}

impl Lightbox {
    pub fn new(photos: Vec<Photo>) -> Self {
        Self {
            photos,
            current: 0,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Open on photo `index`.  Out-of-range indices are ignored.
    pub fn open(&mut self, index: usize) {
        if index < self.photos.len() {
            self.current = index;
            self.open = true;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next(&mut self) {
        if !self.photos.is_empty() {
            self.current = (self.current + 1) % self.photos.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.photos.is_empty() {
            self.current = (self.current + self.photos.len() - 1) % self.photos.len();
        }
    }

    pub fn position(&self) -> usize {
        self.current
    }

    /// The photo on display, if the lightbox is open.
    pub fn current(&self) -> Option<&Photo> {
        if self.open {
            self.photos.get(self.current)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightbox(n: usize) -> Lightbox {
        Lightbox::new(
            (0..n)
                .map(|i| Photo {
                    src: format!("photos/{i}.jpg"),
                    caption: format!("Photo {i}"),
                })
                .collect(),
        )
    }

    #[test]
    fn starts_closed() {
        let lb = lightbox(3);
        assert!(!lb.is_open());
        assert!(lb.current().is_none());
    }

    #[test]
    fn open_shows_requested_photo() {
        let mut lb = lightbox(3);
        lb.open(1);
        assert_eq!(lb.current().unwrap().caption, "Photo 1");
    }

    #[test]
    fn open_out_of_range_is_ignored() {
        let mut lb = lightbox(2);
        lb.open(5);
        assert!(!lb.is_open());
    }

    #[test]
    fn next_wraps_to_first() {
        let mut lb = lightbox(3);
        lb.open(2);
        lb.next();
        assert_eq!(lb.position(), 0);
    }

    #[test]
    fn prev_wraps_to_last() {
        let mut lb = lightbox(3);
        lb.open(0);
        lb.prev();
        assert_eq!(lb.position(), 2);
    }

    #[test]
    fn close_hides_current() {
        let mut lb = lightbox(1);
        lb.open(0);
        lb.close();
        assert!(lb.current().is_none());
    }

    #[test]
    fn navigation_on_empty_gallery_is_noop() {
        let mut lb = lightbox(0);
        lb.next();
        lb.prev();
        lb.open(0);
        assert_eq!(lb.position(), 0);
        assert!(!lb.is_open());
    }
}
