/// Source of uniform draws in `[0, 1)` for the acceptance test.
///
/// One source per running experiment, owned by one thread, so the
/// draw sequence (and hence every query decision) is reproducible.
/// Production code seeds a PRNG; tests may script the exact sequence.
pub trait IDrawSource: Send {
    fn next_draw(&mut self) -> f64;
}
