//! The shared text pool that comment columns slice into.
//!
//! The pool is one long ASCII string of grammar-generated sentences, built
//! once from a fixed seed. Comment values are windows into it, so comment
//! generation costs two bounded draws per value and no allocation.

use std::sync::LazyLock;

use crate::distribution::{
    ADJECTIVES, ADVERBS, AUXILIARIES, GRAMMAR, NOUNS, NOUN_PHRASE, PREPOSITIONS, TERMINATORS,
    VERBS, VERB_PHRASE,
};
use crate::random::RandomStream;

const POOL_SEED: i64 = 933588178;

/// Pool size in bytes. Large enough that the longest comment window
/// (partsupp, up to 198 bytes) samples a negligible fraction of it.
const POOL_SIZE: i32 = 8 * 1024 * 1024;

static POOL: LazyLock<TextPool> = LazyLock::new(|| TextPool::generate(POOL_SIZE));

#[derive(Debug)]
pub struct TextPool {
    text: String,
}

impl TextPool {
    /// The process-wide pool, built on first use.
    pub fn shared() -> &'static TextPool {
        &POOL
    }

    fn generate(target_size: i32) -> Self {
        let target = target_size as usize;
        let mut stream = RandomStream::new(POOL_SEED, i32::MAX);
        let mut text = String::with_capacity(target + 512);

        while text.len() < target {
            generate_sentence(&mut stream, &mut text);
            text.push(' ');
        }
        text.truncate(target);

        debug_assert!(text.is_ascii());
        Self { text }
    }

    pub fn size(&self) -> i32 {
        self.text.len() as i32
    }

    /// The pool slice `[begin, end)`.
    pub fn text(&self, begin: i32, end: i32) -> &str {
        &self.text[begin as usize..end as usize]
    }
}

fn generate_sentence(stream: &mut RandomStream, out: &mut String) {
    let syntax = GRAMMAR.random_value(stream).as_bytes();

    // Tokens are single letters separated by spaces.
    let mut index = 0;
    while index < syntax.len() {
        match syntax[index] {
            b'V' => generate_verb_phrase(stream, out),
            b'N' => generate_noun_phrase(stream, out),
            b'P' => {
                out.push_str(PREPOSITIONS.random_value(stream));
                out.push_str(" the ");
                generate_noun_phrase(stream, out);
            }
            b'T' => {
                // The terminator attaches to the previous word.
                if out.ends_with(' ') {
                    out.pop();
                }
                out.push_str(TERMINATORS.random_value(stream));
            }
            _ => {}
        }
        if syntax[index] != b'T' {
            out.push(' ');
        }
        index += 2;
    }
}

fn generate_noun_phrase(stream: &mut RandomStream, out: &mut String) {
    let syntax = NOUN_PHRASE.random_value(stream).as_bytes();
    for &token in syntax {
        match token {
            b'J' => out.push_str(ADJECTIVES.random_value(stream)),
            b'D' => out.push_str(ADVERBS.random_value(stream)),
            b'N' => out.push_str(NOUNS.random_value(stream)),
            b',' => {
                if out.ends_with(' ') {
                    out.pop();
                }
                out.push(',');
            }
            b' ' => out.push(' '),
            _ => {}
        }
    }
}

fn generate_verb_phrase(stream: &mut RandomStream, out: &mut String) {
    let syntax = VERB_PHRASE.random_value(stream).as_bytes();
    for &token in syntax {
        match token {
            b'V' => out.push_str(VERBS.random_value(stream)),
            b'D' => out.push_str(ADVERBS.random_value(stream)),
            b'X' => out.push_str(AUXILIARIES.random_value(stream)),
            b' ' => out.push(' '),
            _ => {}
        }
    }
}
