#![allow(dead_code)]

use hark::{BoxError, Call, Capability, Handler, HarkError, testing::Transcript};

// ============================================================================
// Fixtures
// ============================================================================

pub type Entry = (&'static str, i32);

/// A handler written by hand, the way a host object would expose methods.
pub struct PlainListener {
    pub transcript: Transcript<Entry>,
}

impl PlainListener {
    pub fn success(&self, value: i32) {
        self.transcript.push(("succeeded", value));
    }

    pub fn failure(&self, value: i32) {
        self.transcript.push(("failed", value));
    }
}

impl Handler<i32, ()> for PlainListener {
    fn responds_to(&self, capability: &Capability) -> bool {
        matches!(capability.as_str(), "success" | "failure")
    }

    fn invoke(&self, call: &Call<'_, i32, ()>) -> Result<(), BoxError> {
        let value = *call.require(0)?;
        match call.capability().as_str() {
            "success" => Ok(self.success(value)),
            "failure" => Ok(self.failure(value)),
            _ => Err(HarkError::MissingCapability(call.capability().clone()).into()),
        }
    }
}

/// A host object with a single computed capability.
pub struct Square;

impl Square {
    pub fn area(&self, side: i32) -> i32 {
        side * side
    }
}

impl Handler<i32, i32> for Square {
    fn responds_to(&self, capability: &Capability) -> bool {
        capability == "area"
    }

    fn invoke(&self, call: &Call<'_, i32, i32>) -> Result<i32, BoxError> {
        Ok(self.area(*call.require(0)?))
    }
}

pub fn success_body(transcript: Transcript<Entry>) -> impl Fn(&Call<'_, i32, ()>) + Send + Sync + 'static {
    move |call| transcript.push(("succeeded", call.args()[0]))
}

pub fn failure_body(transcript: Transcript<Entry>) -> impl Fn(&Call<'_, i32, ()>) + Send + Sync + 'static {
    move |call| transcript.push(("failed", call.args()[0]))
}
