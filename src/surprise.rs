//! Example prompts for the "Surprise me" button

use rand::Rng;
use rand::seq::IteratorRandom;

pub const PROMPTS: &[&str] = &[
    "an armchair in the shape of an avocado",
    "a lighthouse on a floating island at dusk, oil painting",
    "a corgi astronaut planting a flag on the moon, digital art",
    "a bowl of ramen in the style of Hokusai's Great Wave",
    "a steampunk owl made of brass gears, studio lighting",
    "a cozy cabin in a snowy forest seen through a frosted window",
    "a robot reading a book in a sunlit library, watercolor",
    "a jellyfish city glowing at the bottom of the ocean",
    "a portrait of a cat wearing a Victorian ruff collar",
    "a neon-lit street market in the rain, cinematic",
    "a treehouse village connected by rope bridges, isometric",
    "a hot air balloon shaped like a strawberry over lavender fields",
    "an origami dragon unfolding into a real dragon",
    "a desert caravan of mechanical camels at sunset",
    "a greenhouse on Mars with a single sunflower",
    "a pixel art knight fighting a giant snail",
    "a still life of fruit made of stained glass",
    "a fox in a raincoat waiting at a tram stop, children's book illustration",
    "an ancient library carved into a glacier",
    "a teapot spilling a tiny galaxy onto a saucer",
];

/// Pick a prompt at random, never the one currently in the field
pub fn random_prompt(current: &str) -> &'static str {
    pick_prompt(&mut rand::thread_rng(), current)
}

pub fn pick_prompt<R: Rng + ?Sized>(rng: &mut R, current: &str) -> &'static str {
    PROMPTS
        .iter()
        .copied()
        .filter(|prompt| *prompt != current)
        .choose(rng)
        // PROMPTS has more than one entry, so at most one is filtered out
        .unwrap_or(PROMPTS[0])
}
