use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub const QUOTES: &[Quote] = &[
    Quote {
        text: "The secret of getting ahead is getting started.",
        author: "Mark Twain",
    },
    Quote {
        text: "Discipline is choosing between what you want now and what you want most.",
        author: "Abraham Lincoln (attributed)",
    },
    Quote {
        text: "It always seems impossible until it's done.",
        author: "Nelson Mandela",
    },
    Quote {
        text: "What you do every day matters more than what you do once in a while.",
        author: "Gretchen Rubin",
    },
    Quote {
        text: "Be regular and orderly in your life, so that you may be violent and original in your work.",
        author: "Gustave Flaubert",
    },
];

pub fn random_quote() -> Quote {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0])
}
