use cgisf_lib::cgisf;
use rand::Rng;

/// Generate `count` grammatical nonsense sentences joined into one text.
pub fn random_sentences<R: Rng + ?Sized>(count: usize, rng: &mut R) -> String {
    let sentences: Vec<String> = (0..count)
        .map(|_| {
            cgisf(
                rng.gen_range(1..3),
                rng.gen_range(1..3),
                rng.gen_range(1..5),
                rng.gen_bool(0.5),
                rng.gen_range(1..3),
                rng.gen_bool(0.5),
            )
            .trim()
            .to_string()
        })
        .filter(|s| !s.is_empty())
        .collect();

    sentences.join(" ")
}
