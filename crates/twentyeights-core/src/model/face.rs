use std::fmt;

/// The eight card faces used in 28. The trick-taking order is not the usual
/// one: Jack is highest, then Nine, then Ace and Ten ahead of the court cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Seven,
    Eight,
    Queen,
    King,
    Ten,
    Ace,
    Nine,
    Jack,
}

impl Face {
    /// All faces, strongest first.
    pub const ORDERED: [Face; 8] = [
        Face::Jack,
        Face::Nine,
        Face::Ace,
        Face::Ten,
        Face::King,
        Face::Queen,
        Face::Eight,
        Face::Seven,
    ];

    /// Within-suit strength before any trump boost. Jack 7 down to Seven 0.
    pub const fn rank(self) -> u8 {
        match self {
            Face::Jack => 7,
            Face::Nine => 6,
            Face::Ace => 5,
            Face::Ten => 4,
            Face::King => 3,
            Face::Queen => 2,
            Face::Eight => 1,
            Face::Seven => 0,
        }
    }

    /// Honor points the face is worth when captured. Each suit carries 7,
    /// for 28 across the deck.
    pub const fn points(self) -> u8 {
        match self {
            Face::Jack => 3,
            Face::Nine => 2,
            Face::Ace => 1,
            Face::Ten => 1,
            _ => 0,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Face::Jack => 'J',
            Face::Nine => '9',
            Face::Ace => 'A',
            Face::Ten => 'T',
            Face::King => 'K',
            Face::Queen => 'Q',
            Face::Eight => '8',
            Face::Seven => '7',
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
