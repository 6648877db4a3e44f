use gs_core::{Character, GameTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const REPLIES: &[&str] = &[
    "I've told you everything I know, Inspector.",
    "I'd rather not say any more just now.",
    "You'll have to ask someone else about that.",
    "It was a long evening. I don't remember the details.",
    "Is this going to take much longer?",
    "I was minding my own business, if you must know.",
];

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// A generic in-character line for when no generated reply is available.
///
/// The choice depends only on the seed, the character, and the time, so the
/// same question at the same moment always gets the same answer.
pub fn reply(seed: u64, character: &Character, time: GameTime) -> String {
    let key = seed ^ fnv1a(character.id.as_str().as_bytes()) ^ time.minutes as u64;
    let mut rng = StdRng::seed_from_u64(key);
    let line = REPLIES[rng.random_range(0..REPLIES.len())];
    if character.mental_state.is_empty() {
        format!("{}: \"{line}\"", character.name)
    } else {
        format!("{} ({}): \"{line}\"", character.name, character.mental_state)
    }
}
