//! Mitsuki, the house dealer.
//!
//! One line of table talk attached to hand milestones. Picked
//! deterministically from the hand number so replays narrate identically;
//! none of it affects play.

const DEALS: &[&str] = &[
    "Mitsuki riffles the deck once more and slides the cards out.",
    "Mitsuki taps the felt. \"Cards are in the air.\"",
    "\"New hand, new chances,\" Mitsuki murmurs, dealing around the table.",
    "Mitsuki fans the deck, burns nothing yet, and begins the deal.",
    "\"Blinds, please.\" Mitsuki pushes the button along and deals.",
    "Mitsuki deals with a flourish that fools absolutely nobody.",
];

const SHOWDOWNS: &[&str] = &[
    "\"Let's see them,\" Mitsuki says, spreading the board wide.",
    "Mitsuki counts the pot twice. She always counts twice.",
    "\"On their backs.\" Mitsuki turns the hands over one by one.",
    "Mitsuki reads the board in silence, then pushes the chips.",
    "\"The cards speak,\" Mitsuki says, and they do.",
];

const UNCONTESTED: &[&str] = &[
    "Mitsuki sweeps the pot across without a word.",
    "\"No callers.\" Mitsuki pushes the pot and racks the deck.",
    "Mitsuki slides the chips over and mucks the rest, unseen.",
    "\"Taking it down early,\" Mitsuki notes, collecting the cards.",
];

fn pick(lines: &[&str], hand: u64) -> String {
    lines[(hand as usize) % lines.len()].to_string()
}

pub fn deal(hand: u64) -> String {
    pick(DEALS, hand)
}

pub fn showdown(hand: u64) -> String {
    pick(SHOWDOWNS, hand)
}

pub fn uncontested(hand: u64) -> String {
    pick(UNCONTESTED, hand)
}

pub fn welcome(name: &str) -> String {
    format!("Mitsuki nods as {} takes a seat. \"Welcome to the room.\"", name)
}
