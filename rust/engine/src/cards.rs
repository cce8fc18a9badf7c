use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Represents one of the four suits of a French-suited pack.
/// Jokers carry no suit, see [`Card::suit`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

/// Represents the rank (face value) of a card, including the wild joker.
/// The rank alone decides which moves a card offers, see [`Rank::actions`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4, forwards or backwards
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7, the split move
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack, switches two marbles
    Jack,
    /// Queen (12 steps)
    Queen,
    /// King (enter or 13 steps)
    King,
    /// Ace (enter, 1 or 11 steps)
    Ace,
    /// Wild card offering every action
    Joker,
}

/// Stable identity of a card instance within the 108-card stock.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A move a card allows its holder to make.
///
/// On the wire the actions keep the mixed integer/string encoding clients
/// already speak: `0` enters a marble, `1..=13` walks forward, `-4` walks
/// backwards, `7` is the split seven and `"switch"` exchanges two marbles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MoveAction {
    /// Release a marble from base onto its entry node
    Enter,
    /// Walk forward the given number of nodes (never 7, never 0)
    Forward(u8),
    /// Walk four nodes backwards
    Backward,
    /// Distribute seven single steps over own marbles
    Seven,
    /// Exchange the places of two marbles of different players
    Switch,
}

impl fmt::Display for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveAction::Enter => write!(f, "0"),
            MoveAction::Forward(n) => write!(f, "{}", n),
            MoveAction::Backward => write!(f, "-4"),
            MoveAction::Seven => write!(f, "7"),
            MoveAction::Switch => write!(f, "switch"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireAction {
    Steps(i8),
    Named(String),
}

impl Serialize for MoveAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match *self {
            MoveAction::Enter => WireAction::Steps(0),
            MoveAction::Forward(n) => WireAction::Steps(n as i8),
            MoveAction::Backward => WireAction::Steps(-4),
            MoveAction::Seven => WireAction::Steps(7),
            MoveAction::Switch => WireAction::Named("switch".to_string()),
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MoveAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        match WireAction::deserialize(deserializer)? {
            WireAction::Steps(0) => Ok(MoveAction::Enter),
            WireAction::Steps(-4) => Ok(MoveAction::Backward),
            WireAction::Steps(7) => Ok(MoveAction::Seven),
            WireAction::Steps(n @ 1..=13) => Ok(MoveAction::Forward(n as u8)),
            WireAction::Steps(n) => Err(D::Error::custom(format!("invalid step count {}", n))),
            WireAction::Named(s) if s == "switch" => Ok(MoveAction::Switch),
            WireAction::Named(s) => Err(D::Error::custom(format!("unknown action {:?}", s))),
        }
    }
}

impl Rank {
    /// The ordered list of actions a card of this rank offers.
    pub fn actions(self) -> Vec<MoveAction> {
        use MoveAction::*;
        match self {
            Rank::Ace => vec![Enter, Forward(1), Forward(11)],
            Rank::King => vec![Enter, Forward(13)],
            Rank::Queen => vec![Forward(12)],
            Rank::Jack => vec![Switch],
            Rank::Seven => vec![Seven],
            Rank::Four => vec![Backward, Forward(4)],
            Rank::Joker => {
                let mut all = vec![Enter];
                all.extend((1..=6).map(Forward));
                all.push(Seven);
                all.extend((8..=13).map(Forward));
                all.push(Switch);
                all.push(Backward);
                all
            }
            pip => vec![Forward(pip as u8)],
        }
    }

    /// Short face label used in logs and the `deal` output.
    pub fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Joker => "Jo",
        }
    }
}

/// A single card of the stock: identity, face and suit.
/// Cards are plain values; the uid is what makes an instance unique.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id within the stock
    pub uid: CardId,
    /// Face value
    pub rank: Rank,
    /// Suit, `None` for jokers
    pub suit: Option<Suit>,
}

impl Card {
    pub fn actions(&self) -> Vec<MoveAction> {
        self.rank.actions()
    }

    pub fn offers(&self, action: MoveAction) -> bool {
        self.rank.actions().contains(&action)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self.suit {
            Some(Suit::Clubs) => "♣",
            Some(Suit::Diamonds) => "♦",
            Some(Suit::Hearts) => "♥",
            Some(Suit::Spades) => "♠",
            None => "",
        };
        write!(f, "{}{}{}", self.rank.label(), suit, self.uid)
    }
}

/// Number of standard packs shuffled together.
pub const PACKS: usize = 2;
/// Number of jokers added on top of the packs.
pub const JOKERS: usize = 4;
/// Size of the full stock: two packs plus jokers.
pub const STOCK_SIZE: usize = 52 * PACKS + JOKERS;

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

/// Ranks in uid-block order, highest face first.
pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
        Rank::Five,
        Rank::Four,
        Rank::Three,
        Rank::Two,
    ]
}

/// Builds the unshuffled stock.
///
/// Uids run rank-major, then suit, then pack copy, so both aces of hearts are
/// `#4` and `#5` and the jokers close the range at `#104..=#107`.
pub fn full_stock() -> Vec<Card> {
    let mut v = Vec::with_capacity(STOCK_SIZE);
    for &r in &all_ranks() {
        for &s in &all_suits() {
            for _ in 0..PACKS {
                v.push(Card {
                    uid: CardId(v.len() as u8),
                    rank: r,
                    suit: Some(s),
                });
            }
        }
    }
    for _ in 0..JOKERS {
        v.push(Card {
            uid: CardId(v.len() as u8),
            rank: Rank::Joker,
            suit: None,
        });
    }
    v
}
