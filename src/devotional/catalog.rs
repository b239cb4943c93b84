//! Static catalog of Bible books and their chapter counts.

/// Books of the Protestant canon with their number of chapters.
const BOOKS: [(&str, u32); 66] = [
    ("Genesis", 50),
    ("Exodus", 40),
    ("Leviticus", 27),
    ("Numbers", 36),
    ("Deuteronomy", 34),
    ("Joshua", 24),
    ("Judges", 21),
    ("Ruth", 4),
    ("1 Samuel", 31),
    ("2 Samuel", 24),
    ("1 Kings", 22),
    ("2 Kings", 25),
    ("1 Chronicles", 29),
    ("2 Chronicles", 36),
    ("Ezra", 10),
    ("Nehemiah", 13),
    ("Esther", 10),
    ("Job", 42),
    ("Psalms", 150),
    ("Proverbs", 31),
    ("Ecclesiastes", 12),
    ("Song of Solomon", 8),
    ("Isaiah", 66),
    ("Jeremiah", 52),
    ("Lamentations", 5),
    ("Ezekiel", 48),
    ("Daniel", 12),
    ("Hosea", 14),
    ("Joel", 3),
    ("Amos", 9),
    ("Obadiah", 1),
    ("Jonah", 4),
    ("Micah", 7),
    ("Nahum", 3),
    ("Habakkuk", 3),
    ("Zephaniah", 3),
    ("Haggai", 2),
    ("Zechariah", 14),
    ("Malachi", 4),
    ("Matthew", 28),
    ("Mark", 16),
    ("Luke", 24),
    ("John", 21),
    ("Acts", 28),
    ("Romans", 16),
    ("1 Corinthians", 16),
    ("2 Corinthians", 13),
    ("Galatians", 6),
    ("Ephesians", 6),
    ("Philippians", 4),
    ("Colossians", 4),
    ("1 Thessalonians", 5),
    ("2 Thessalonians", 3),
    ("1 Timothy", 6),
    ("2 Timothy", 4),
    ("Titus", 3),
    ("Philemon", 1),
    ("Hebrews", 13),
    ("James", 5),
    ("1 Peter", 5),
    ("2 Peter", 3),
    ("1 John", 5),
    ("2 John", 1),
    ("3 John", 1),
    ("Jude", 1),
    ("Revelation", 22),
];

/// Read-only mapping from book name to chapter count.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookCatalog;

impl BookCatalog {
    /// Returns the standard catalog.
    #[must_use]
    pub const fn standard() -> Self {
        Self
    }

    /// Iterates over `(book, chapters)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> {
        BOOKS.iter().copied()
    }

    /// Number of books in the catalog.
    #[must_use]
    pub const fn len(&self) -> usize {
        BOOKS.len()
    }

    /// Always false; the catalog is fixed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        BOOKS.is_empty()
    }

    /// Looks up a book by name, ignoring case and repeated whitespace.
    ///
    /// Returns the canonical name and the chapter count.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<(&'static str, u32)> {
        let wanted = normalize(name);
        self.iter().find(|(book, _)| normalize(book) == wanted)
    }

    /// Chapter count of a book, if known.
    #[must_use]
    pub fn chapters(&self, name: &str) -> Option<u32> {
        self.find(name).map(|(_, chapters)| chapters)
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
