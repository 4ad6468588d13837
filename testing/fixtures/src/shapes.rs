pub trait Shape {
    fn area(&self) -> f64;
}

pub trait Bounded: Shape {
    fn bounds(&self) -> (f64, f64);
}

pub trait Colored: Shape {
    fn color(&self) -> String;
}

pub trait Widget: Bounded + Colored {
    fn label(&self) -> String;
}

///
/// Square
///

#[derive(Clone, Copy, Debug)]
pub struct Square {
    pub side: f64,
}

impl Shape for Square {
    fn area(&self) -> f64 {
        self.side * self.side
    }
}

impl Bounded for Square {
    fn bounds(&self) -> (f64, f64) {
        (self.side, self.side)
    }
}

impl Colored for Square {
    fn color(&self) -> String {
        "red".to_string()
    }
}

impl Widget for Square {
    fn label(&self) -> String {
        format!("square {}", self.side)
    }
}

///
/// Panel
///

pub struct Panel {
    pub widget: Box<dyn Widget>,
    pub title: String,
}

impl Panel {
    #[must_use]
    pub fn new(title: String) -> Self {
        Self {
            widget: Box::new(Square { side: 2.0 }),
            title,
        }
    }
}

autoimpl::include_generated!("shapes/panel_impl.rs");
