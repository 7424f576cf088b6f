//! Fan-out, normalization, and the end-to-end scenarios.

mod common;

use std::sync::Arc;

use common::Square;
use hark::{
    BoxError, Call, Dispatcher, HarkError, Input, LaxListener, StrictListener, Trailing, hark,
    listener, listener_with, testing::{RecordingHandler, Transcript},
};

#[test]
fn fan_out_runs_every_responder_in_order() {
    let transcript = Transcript::new();
    let inputs = (0..5).map(|i| {
        let transcript = transcript.clone();
        Input::on(if i % 2 == 0 { "even" } else { "odd" }, move |call: &Call<'_, i32, i32>| {
            transcript.push(i);
            call.args()[0] + i
        })
    });
    let listener: StrictListener<i32, i32> = listener(inputs);

    assert_eq!(listener.dispatch("even", &[10]).unwrap(), vec![10, 12, 14]);
    assert_eq!(listener.dispatch("odd", &[10]).unwrap(), vec![11, 13]);
    assert_eq!(transcript.entries(), vec![0, 2, 4, 1, 3]);
}

#[test]
fn renormalizing_a_listener_is_a_no_op() {
    let recorder = RecordingHandler::<i32, i32>::new(["ping"], 1);
    let original: StrictListener<i32, i32> = listener([
        hark! { ping => |_: &Call<'_, i32, i32>| 0 },
        Input::handler(recorder.clone()),
    ]);

    let again: StrictListener<i32, i32> = listener([Input::from(&original)]);
    let dispatcher = Dispatcher::from_inputs([Input::from(original.clone())], None);

    for handlers in [again.dispatcher().handlers(), dispatcher.handlers()] {
        assert_eq!(handlers.len(), original.dispatcher().len());
        for (a, b) in handlers.iter().zip(original.dispatcher().handlers()) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    assert_eq!(again.dispatch("ping", &[]).unwrap(), vec![0, 1]);
    assert_eq!(recorder.call_count(), 1);
}

#[test]
fn strict_lax_strict_keeps_handlers() {
    let strict: StrictListener<i32, i32> = listener([hark! { area => |c: &Call<'_, i32, i32>| c.args()[0] }]);
    let back = strict.lax().strict();

    assert_eq!(back.dispatcher().len(), strict.dispatcher().len());
    assert!(Arc::ptr_eq(
        &back.dispatcher().handlers()[0],
        &strict.dispatcher().handlers()[0]
    ));
    assert_eq!(back.dispatch("area", &[4]).unwrap(), vec![4]);
}

#[test]
fn falsy_results_are_not_absence() {
    let listener: StrictListener<i32, Option<i32>> = listener([hark! {
        nothing => |_: &Call<'_, i32, Option<i32>>| None,
    }]);

    assert_eq!(listener.dispatch("nothing", &[]).unwrap(), vec![None]);
    assert!(listener.dispatch("missing", &[]).is_err());
}

#[test]
fn first_failure_aborts_the_broadcast() {
    let after = RecordingHandler::<i32, i32>::new(["go"], 2);
    let listener: LaxListener<i32, i32> = listener([
        Input::try_on("go", |_: &Call<'_, i32, i32>| -> Result<i32, BoxError> {
            Err("boom".into())
        }),
        Input::handler(after.clone()),
    ])
    .lax();

    let err = listener.dispatch("go", &[]).unwrap_err();
    assert_eq!(err.to_string(), "boom");
    assert_eq!(after.call_count(), 0);
}

#[test]
fn missing_argument_surfaces_as_hark_error() {
    let listener: StrictListener<i32, i32> = listener([Input::try_on(
        "first",
        |call: &Call<'_, i32, i32>| -> Result<i32, BoxError> { Ok(*call.require(0)?) },
    )]);

    let err = listener.dispatch("first", &[]).unwrap_err();
    assert!(matches!(err, HarkError::MissingArgument { index: 0, .. }));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn success_and_failure_listener() {
    let transcript = Transcript::new();
    let (ok, failed) = (transcript.clone(), transcript.clone());
    let listener: StrictListener<i32, ()> = listener([hark! {
        success => move |c: &Call<'_, i32, ()>| ok.push(("succeeded", c.args()[0])),
        failure => move |c: &Call<'_, i32, ()>| failed.push(("failed", c.args()[0])),
    }]);

    listener.dispatch("success", &[42]).unwrap();
    assert_eq!(transcript.entries(), vec![("succeeded", 42)]);

    let err = listener.dispatch("other", &[]).unwrap_err();
    assert_eq!(err.to_string(), "undefined capability `other` for strict listener");
    assert!(listener.lax().dispatch("other", &[]).unwrap().is_empty());
}

#[test]
fn composed_signup_listener() {
    let transcript = Transcript::<String>::new();
    let (logged, emailed) = (transcript.clone(), transcript.clone());

    let log: StrictListener<String, String> = listener([hark! {
        signed_up => move |c: &Call<'_, String, String>| {
            let line = format!("User {} signed up", c.args()[0]);
            logged.push(line.clone());
            line
        },
    }]);
    let mail: StrictListener<String, String> = listener([hark! {
        signed_up => move |c: &Call<'_, String, String>| {
            emailed.push(format!("Emailed {}", c.args()[0]));
            String::new()
        },
    }]);

    let both = log.hark(mail);
    let results = both.dispatch("signed_up", &["Fred".to_string()]).unwrap();

    assert_eq!(results, vec!["User Fred signed up".to_string(), String::new()]);
    assert_eq!(
        transcript.entries(),
        vec!["User Fred signed up".to_string(), "Emailed Fred".to_string()]
    );
}

#[test]
fn host_object_handler() {
    let listener: StrictListener<i32, i32> = listener([Input::handler(Square)]);

    assert_eq!(listener.dispatch("area", &[5]).unwrap(), vec![Square.area(5)]);
    assert_eq!(listener.dispatch("area", &[5]).unwrap(), vec![25]);
    assert!(listener.dispatch("perimeter", &[5]).is_err());
}

#[test]
fn trailing_named_callable() {
    let greeted = Transcript::<String>::new();
    let sink = greeted.clone();

    let listener: StrictListener<String, ()> = listener_with(
        [],
        Some(Trailing::named("greet", move |c: &Call<'_, String, ()>| {
            sink.push(format!("hello {}", c.args()[0]))
        })),
    );

    listener.dispatch("greet", &["Ann".to_string()]).unwrap();
    assert!(listener.dispatch("other", &[]).is_err());
    assert_eq!(greeted.entries(), vec!["hello Ann".to_string()]);
}

#[test]
fn block_reaches_every_handler() {
    let listener: StrictListener<i32, i32> = listener([
        hark! { each => |c: &Call<'_, i32, i32>| c.yield_block(c.args()).unwrap_or(0) },
        hark! { each => |c: &Call<'_, i32, i32>| c.yield_block(&[1]).unwrap_or(0) },
    ]);

    let sum: &hark::Block<i32, i32> = &|args: &[i32]| args.iter().sum();
    assert_eq!(
        listener.dispatch_with_block("each", &[2, 3], sum).unwrap(),
        vec![5, 1]
    );
    assert_eq!(listener.dispatch("each", &[2, 3]).unwrap(), vec![0, 0]);
}
