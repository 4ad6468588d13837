pub trait Named {
    fn name(&self) -> String;
}

pub trait Speaker: Named {
    fn speak(&self) -> String;

    fn set_volume(&mut self, volume: u8);
}

///
/// Loud
///

#[derive(Debug)]
pub struct Loud {
    volume: u8,
}

impl Default for Loud {
    fn default() -> Self {
        Self { volume: 1 }
    }
}

impl Named for Loud {
    fn name(&self) -> String {
        "loud".to_string()
    }
}

impl Speaker for Loud {
    fn speak(&self) -> String {
        "HELLO".repeat(usize::from(self.volume))
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume;
    }
}
