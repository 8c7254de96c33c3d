//! Static value distributions backing the categorical columns and the text
//! grammar.
//!
//! The benchmark ships these as a data file; here they are compiled in as
//! literal tables so generation needs no runtime inputs. A [`Distribution`]
//! pre-expands its weights into a pick table, which turns a weighted draw
//! into a single bounded draw plus an index.

use std::sync::LazyLock;

use crate::random::RandomStream;

/// The 25 nations with their fixed region keys, in nation-key order.
pub const NATIONS: [(&str, i64); 25] = [
    ("ALGERIA", 0),
    ("ARGENTINA", 1),
    ("BRAZIL", 1),
    ("CANADA", 1),
    ("EGYPT", 4),
    ("ETHIOPIA", 0),
    ("FRANCE", 3),
    ("GERMANY", 3),
    ("INDIA", 2),
    ("INDONESIA", 2),
    ("IRAN", 4),
    ("IRAQ", 4),
    ("JAPAN", 2),
    ("JORDAN", 4),
    ("KENYA", 0),
    ("MOROCCO", 0),
    ("MOZAMBIQUE", 0),
    ("PERU", 1),
    ("CHINA", 2),
    ("ROMANIA", 3),
    ("SAUDI ARABIA", 4),
    ("VIETNAM", 2),
    ("RUSSIA", 3),
    ("UNITED KINGDOM", 3),
    ("UNITED STATES", 1),
];

/// The 5 regions in region-key order.
pub const REGIONS: [&str; 5] = ["AFRICA", "AMERICA", "ASIA", "EUROPE", "MIDDLE EAST"];

/// A weighted set of string values supporting uniform-cost random picks.
#[derive(Debug)]
pub struct Distribution {
    members: Vec<String>,
    /// Expanded weight table; entry `i` is an index into `members`.
    pick: Vec<u32>,
    max_weight: i32,
}

impl Distribution {
    fn new(entries: impl IntoIterator<Item = (String, i32)>) -> Self {
        let mut members = Vec::new();
        let mut pick = Vec::new();
        for (value, weight) in entries {
            let index = members.len() as u32;
            members.push(value);
            for _ in 0..weight {
                pick.push(index);
            }
        }
        let max_weight = pick.len() as i32;
        Self {
            members,
            pick,
            max_weight,
        }
    }

    fn weighted(entries: &[(&str, i32)]) -> Self {
        Self::new(entries.iter().map(|(v, w)| (v.to_string(), *w)))
    }

    fn uniform(values: impl IntoIterator<Item = String>) -> Self {
        Self::new(values.into_iter().map(|v| (v, 1)))
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn value(&self, index: usize) -> &str {
        &self.members[index]
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|s| s.as_str())
    }

    pub fn random_value(&self, stream: &mut RandomStream) -> &str {
        let index = stream.next_int(0, self.max_weight - 1);
        &self.members[self.pick[index as usize] as usize]
    }
}

/// The 92 color words used to build part names.
pub static COLORS: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::uniform(
        [
            "almond",
            "antique",
            "aquamarine",
            "azure",
            "beige",
            "bisque",
            "black",
            "blanched",
            "blue",
            "blush",
            "brown",
            "burlywood",
            "burnished",
            "chartreuse",
            "chiffon",
            "chocolate",
            "coral",
            "cornflower",
            "cornsilk",
            "cream",
            "cyan",
            "dark",
            "deep",
            "dim",
            "dodger",
            "drab",
            "firebrick",
            "floral",
            "forest",
            "frosted",
            "gainsboro",
            "ghost",
            "goldenrod",
            "green",
            "grey",
            "honeydew",
            "hot",
            "indian",
            "ivory",
            "khaki",
            "lace",
            "lavender",
            "lawn",
            "lemon",
            "light",
            "lime",
            "linen",
            "magenta",
            "maroon",
            "medium",
            "metallic",
            "midnight",
            "mint",
            "misty",
            "moccasin",
            "navajo",
            "navy",
            "olive",
            "orange",
            "orchid",
            "pale",
            "papaya",
            "peach",
            "peru",
            "pink",
            "plum",
            "powder",
            "puff",
            "purple",
            "red",
            "rose",
            "rosy",
            "royal",
            "saddle",
            "salmon",
            "sandy",
            "seashell",
            "sienna",
            "sky",
            "slate",
            "smoke",
            "snow",
            "spring",
            "steel",
            "tan",
            "thistle",
            "tomato",
            "turquoise",
            "violet",
            "wheat",
            "white",
            "yellow",
        ]
        .into_iter()
        .map(str::to_string),
    )
});

/// Part types: `SYLLABLE1 SYLLABLE2 SYLLABLE3` cross product, 150 values.
pub static PART_TYPES: LazyLock<Distribution> = LazyLock::new(|| {
    const S1: [&str; 6] = ["STANDARD", "SMALL", "MEDIUM", "LARGE", "ECONOMY", "PROMO"];
    const S2: [&str; 5] = ["ANODIZED", "BURNISHED", "PLATED", "POLISHED", "BRUSHED"];
    const S3: [&str; 5] = ["TIN", "NICKEL", "BRASS", "STEEL", "COPPER"];
    Distribution::uniform(S1.iter().flat_map(|a| {
        S2.iter()
            .flat_map(move |b| S3.iter().map(move |c| format!("{a} {b} {c}")))
    }))
});

/// Part containers: `SIZE KIND` cross product, 40 values.
pub static CONTAINERS: LazyLock<Distribution> = LazyLock::new(|| {
    const SIZES: [&str; 5] = ["SM", "LG", "MED", "JUMBO", "WRAP"];
    const KINDS: [&str; 8] = ["CASE", "BOX", "BAG", "JAR", "PKG", "PACK", "CAN", "DRUM"];
    Distribution::uniform(
        SIZES
            .iter()
            .flat_map(|s| KINDS.iter().map(move |k| format!("{s} {k}"))),
    )
});

pub static MARKET_SEGMENTS: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::uniform(
        ["AUTOMOBILE", "BUILDING", "FURNITURE", "MACHINERY", "HOUSEHOLD"]
            .into_iter()
            .map(str::to_string),
    )
});

pub static ORDER_PRIORITIES: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::uniform(
        ["1-URGENT", "2-HIGH", "3-MEDIUM", "4-NOT SPECIFIED", "5-LOW"]
            .into_iter()
            .map(str::to_string),
    )
});

pub static SHIP_INSTRUCTIONS: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::uniform(
        ["DELIVER IN PERSON", "COLLECT COD", "NONE", "TAKE BACK RETURN"]
            .into_iter()
            .map(str::to_string),
    )
});

pub static SHIP_MODES: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::uniform(
        ["REG AIR", "AIR", "RAIL", "SHIP", "TRUCK", "MAIL", "FOB"]
            .into_iter()
            .map(str::to_string),
    )
});

pub static RETURN_FLAGS: LazyLock<Distribution> =
    LazyLock::new(|| Distribution::uniform(["R", "A"].into_iter().map(str::to_string)));

// Grammar productions driving the comment text pool. Tokens are single
// letters separated by spaces; the pool builder steps through them two
// bytes at a time.

pub static GRAMMAR: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::weighted(&[
        ("N V T", 3),
        ("N V P T", 3),
        ("N V N T", 3),
        ("N P V N T", 1),
        ("N P V P T", 1),
    ])
});

pub static NOUN_PHRASE: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::weighted(&[("N", 10), ("J N", 20), ("J, J N", 10), ("D J N", 50)])
});

pub static VERB_PHRASE: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::weighted(&[("V", 30), ("X V", 1), ("V D", 40), ("V V", 1)])
});

pub static NOUNS: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::weighted(&[
        ("packages", 40),
        ("requests", 40),
        ("accounts", 40),
        ("deposits", 40),
        ("foxes", 20),
        ("ideas", 20),
        ("theodolites", 20),
        ("pinto beans", 20),
        ("instructions", 20),
        ("dependencies", 10),
        ("excuses", 10),
        ("platelets", 10),
        ("asymptotes", 10),
        ("courts", 5),
        ("dolphins", 5),
        ("multipliers", 1),
        ("sauternes", 1),
        ("warthogs", 1),
        ("frets", 1),
        ("dinos", 1),
        ("attainments", 1),
        ("somas", 1),
        ("Tiresias", 1),
        ("patterns", 1),
        ("forges", 1),
        ("braids", 1),
        ("frays", 1),
        ("warhorses", 1),
        ("dugouts", 1),
        ("notornis", 1),
        ("epitaphs", 1),
        ("pearls", 1),
        ("tithes", 1),
        ("waters", 1),
        ("orbits", 1),
        ("gifts", 1),
        ("sheaves", 1),
        ("depths", 1),
        ("sentiments", 1),
        ("decoys", 1),
        ("realms", 1),
        ("pains", 1),
        ("grouches", 1),
        ("escapades", 1),
        ("hockey players", 1),
    ])
});

pub static VERBS: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::weighted(&[
        ("sleep", 20),
        ("wake", 20),
        ("are", 20),
        ("cajole", 20),
        ("haggle", 20),
        ("nag", 10),
        ("use", 10),
        ("boost", 10),
        ("affix", 5),
        ("detect", 5),
        ("integrate", 5),
        ("maintain", 1),
        ("nod", 1),
        ("was", 1),
        ("lose", 1),
        ("sublate", 1),
        ("solve", 1),
        ("thrash", 1),
        ("promise", 1),
        ("engage", 1),
        ("hinder", 1),
        ("print", 1),
        ("x-ray", 1),
        ("breach", 1),
        ("eat", 1),
        ("grow", 1),
        ("impress", 1),
        ("mold", 1),
        ("poach", 1),
        ("serve", 1),
        ("run", 1),
        ("dazzle", 1),
        ("snooze", 1),
        ("doze", 1),
        ("unwind", 1),
        ("kindle", 1),
        ("play", 1),
        ("hang", 1),
        ("believe", 1),
        ("doubt", 1),
    ])
});

pub static ADJECTIVES: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::weighted(&[
        ("special", 20),
        ("pending", 20),
        ("unusual", 20),
        ("express", 20),
        ("furious", 1),
        ("sly", 1),
        ("careful", 1),
        ("blithe", 1),
        ("quick", 1),
        ("fluffy", 1),
        ("slow", 1),
        ("quiet", 1),
        ("ruthless", 1),
        ("thin", 1),
        ("close", 1),
        ("dogged", 1),
        ("daring", 1),
        ("stealthy", 1),
        ("regular", 50),
        ("final", 40),
        ("ironic", 40),
        ("even", 30),
        ("bold", 20),
        ("silent", 10),
    ])
});

pub static ADVERBS: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::weighted(&[
        ("sometimes", 1),
        ("always", 1),
        ("never", 1),
        ("furiously", 50),
        ("slyly", 50),
        ("carefully", 50),
        ("blithely", 40),
        ("quickly", 30),
        ("fluffily", 20),
        ("slowly", 1),
        ("quietly", 1),
        ("ruthlessly", 1),
        ("thinly", 1),
        ("closely", 1),
        ("doggedly", 1),
        ("daringly", 1),
        ("boldly", 1),
        ("stealthily", 1),
    ])
});

pub static PREPOSITIONS: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::uniform(
        [
            "about", "above", "according to", "across", "after", "against", "along",
            "alongside of", "among", "around", "at", "atop", "before", "behind", "beneath",
            "beside", "besides", "between", "beyond", "by", "despite", "during", "except",
            "for", "from", "in place of", "inside", "instead of", "into", "near", "of", "on",
            "outside", "over", "past", "since", "through", "throughout", "to", "toward",
            "under", "up", "upon", "without", "with", "within",
        ]
        .into_iter()
        .map(str::to_string),
    )
});

pub static AUXILIARIES: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::uniform(
        [
            "do",
            "may",
            "might",
            "shall",
            "will",
            "would",
            "can",
            "could",
            "should",
            "ought to",
            "must",
            "will have to",
            "shall have to",
            "could have to",
            "should have to",
            "must have to",
            "need to",
            "try to",
        ]
        .into_iter()
        .map(str::to_string),
    )
});

pub static TERMINATORS: LazyLock<Distribution> = LazyLock::new(|| {
    Distribution::weighted(&[(".", 50), (";", 5), (":", 5), ("?", 2), ("!", 2), ("--", 1)])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_tables_have_canonical_sizes() {
        assert_eq!(NATIONS.len(), 25);
        assert_eq!(REGIONS.len(), 5);
        assert_eq!(COLORS.size(), 92);
        assert_eq!(PART_TYPES.size(), 150);
        assert_eq!(CONTAINERS.size(), 40);
        assert_eq!(MARKET_SEGMENTS.size(), 5);
        assert_eq!(ORDER_PRIORITIES.size(), 5);
        assert_eq!(SHIP_INSTRUCTIONS.size(), 4);
        assert_eq!(SHIP_MODES.size(), 7);
        assert_eq!(RETURN_FLAGS.size(), 2);
    }

    #[test]
    fn nation_region_keys_are_valid() {
        for (_, region) in NATIONS {
            assert!((0..5).contains(&region));
        }
        // Every region hosts at least one nation.
        for r in 0..5 {
            assert!(NATIONS.iter().any(|(_, region)| *region == r));
        }
    }

    #[test]
    fn random_value_respects_bounds() {
        let mut stream = RandomStream::new(591449447, 1);
        for _ in 0..1000 {
            let v = ORDER_PRIORITIES.random_value(&mut stream);
            assert!(ORDER_PRIORITIES.values().any(|p| p == v));
            stream.row_finished();
        }
    }

    #[test]
    fn part_types_are_three_syllables() {
        for t in PART_TYPES.values() {
            assert_eq!(t.split(' ').count(), 3);
        }
    }
}
