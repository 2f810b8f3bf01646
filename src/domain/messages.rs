use super::enums::{FilterMode, ToastKind};
use super::views::BuddyTier;
use rand::seq::SliceRandom;

const MOTIVATIONAL_QUOTES: &[&str] = &[
    "Absolute unit! 😤",
    "Crushed it! Next? 🚀",
    "You're a machine! 🤖",
    "Light weight, baby! 💪",
    "Unstoppable force! 🌪️",
    "Making it look easy! ✨",
    "Victory tastes sweet! 🍬",
    "One step closer to greatness! 🏆",
    "Level up! ⬆️",
    "Nothing can stop you! 🛑",
];

const ROAST_QUOTES: &[&str] = &[
    "Giving up? Classic. 😒",
    "I saw that. Weak. 👀",
    "Thought you had it? 😂",
    "Procrastination is a thief. 🕵️",
    "Running away from responsibility? 🏃",
    "That task wasn't even hard. 🍼",
    "Do or do not. There is no try. 🧙",
    "Backing out? 🔙",
    "I'm judging you. ⚖️",
    "Another one bites the dust... uncompleted. 💨",
];

/// Header message for the current open-task tier
pub fn buddy_message(tier: BuddyTier) -> &'static str {
    match tier {
        BuddyTier::Zero => "Waiting for your command, legend.",
        BuddyTier::UnderThree => "Just a light warm-up. You got this.",
        BuddyTier::UnderSix => "Plate's getting full. Less planning, more doing.",
        BuddyTier::UnderTen => "Okay, you're hoarding tasks like a dragon hoards gold. 🐉",
        BuddyTier::Max => "Your to-do list is longer than a CVS receipt. SOS. 📜",
    }
}

/// Every quote a toast of this kind may show
pub fn quotes(kind: ToastKind) -> &'static [&'static str] {
    match kind {
        ToastKind::Success => MOTIVATIONAL_QUOTES,
        ToastKind::Roast => ROAST_QUOTES,
    }
}

/// Random quote for a toast
pub fn random_quote(kind: ToastKind) -> &'static str {
    quotes(kind)
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("")
}

/// Headline and hint shown when the filtered list is empty
pub fn empty_messages(filter: FilterMode) -> (&'static str, &'static str) {
    let hint = match filter {
        FilterMode::Completed => "Go finish something first!",
        FilterMode::All | FilterMode::Active => "Time to add something awesome!",
    };
    ("No tasks here", hint)
}
