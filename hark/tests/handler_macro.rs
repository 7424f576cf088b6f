#![cfg(feature = "macros")]

use hark::{BoxError, Capability, Handler, HarkError, Input, StrictListener, listener};

struct Shapes {
    scale: i32,
}

#[hark::handler(args = i32, output = i32)]
impl Shapes {
    pub fn area(&self, side: &i32) -> i32 {
        side * side * self.scale
    }

    #[capability(rename = "perimeter")]
    pub fn edges(&self, side: i32) -> i32 {
        4 * side
    }

    pub fn halve(&self, value: &i32) -> Result<i32, BoxError> {
        if value % 2 == 0 {
            Ok(value / 2)
        } else {
            Err("odd".into())
        }
    }

    #[capability(skip)]
    pub fn hidden(&self) -> i32 {
        0
    }

    fn private(&self) -> i32 {
        1
    }
}

#[test]
fn exposes_public_methods() {
    let shapes = Shapes { scale: 1 };

    assert!(shapes.responds_to(&Capability::from("area")));
    assert!(shapes.responds_to(&Capability::from("perimeter")));
    assert!(shapes.responds_to(&Capability::from("halve")));
    assert!(!shapes.responds_to(&Capability::from("edges")));
    assert!(!shapes.responds_to(&Capability::from("hidden")));
    assert!(!shapes.responds_to(&Capability::from("private")));
    assert_eq!(shapes.hidden() + shapes.private(), 1);
}

#[test]
fn dispatches_through_a_listener() {
    let listener: StrictListener<i32, i32> = listener([Input::handler(Shapes { scale: 2 })]);

    assert_eq!(listener.dispatch("area", &[3]).unwrap(), vec![18]);
    assert_eq!(listener.dispatch("perimeter", &[3]).unwrap(), vec![12]);
    assert_eq!(listener.dispatch("halve", &[8]).unwrap(), vec![4]);
    assert_eq!(listener.dispatch("halve", &[3]).unwrap_err().to_string(), "odd");
    assert!(listener.dispatch("hidden", &[]).unwrap_err().is_unknown_capability());
}

#[test]
fn missing_arguments_are_reported() {
    let listener: StrictListener<i32, i32> = listener([Input::handler(Shapes { scale: 1 })]);

    let err = listener.dispatch("area", &[]).unwrap_err();
    assert!(matches!(err, HarkError::MissingArgument { ref capability, index: 0 } if capability == "area"));
}
