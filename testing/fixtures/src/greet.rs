use crate::speak::{Loud, Speaker};

///
/// Greeter
///

pub struct Greeter {
    pub speaker: Box<dyn Speaker>,
    pub greeting: String,
}

impl Greeter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_greeting("hello".to_string())
    }

    #[must_use]
    pub fn with_greeting(greeting: String) -> Self {
        Self {
            speaker: Box::new(Loud::default()),
            greeting,
        }
    }

    #[must_use]
    pub fn greet(&self) -> String {
        format!("{}, {}", self.greeting, self.speaker.speak())
    }
}

impl Default for Greeter {
    fn default() -> Self {
        Self::new()
    }
}

autoimpl::include_generated!("greet/greeter_impl.rs");
