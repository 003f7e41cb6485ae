/// Majority vote over the last `N` samples of a contact.
///
/// A contact counts as closed while more than half of the recent samples
/// saw it closed, which filters the bounce on both edges.
#[derive(Debug, Eq, PartialEq, defmt::Format)]
pub struct Debounced<const N: usize> {
    samples: [bool; N],
    cursor: usize,
}

impl<const N: usize> Debounced<N> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            samples: [false; N],
            cursor: 0,
        }
    }

    pub fn update(&mut self, value: bool) -> bool {
        self.samples[self.cursor] = value;
        self.cursor = (self.cursor + 1) % N;
        let closed = self.samples.iter().filter(|s| **s).count();
        closed > N / 2
    }
}
