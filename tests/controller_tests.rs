//! Cycle-by-cycle tests for the run controller, driven without a testbench.

use macc_sim::common::SimError;
use macc_sim::core::pipeline::signals::RunInputs;
use macc_sim::core::{RunController, RunState};

const PP_LATENCY: usize = 3;

fn idle(depth: u32) -> RunInputs {
    RunInputs {
        input_depth: depth,
        ..Default::default()
    }
}

/// Controller that has left `Prepare` with `depth` registered.
fn prepared(depth: u32) -> RunController {
    let mut ctrl = RunController::new(16, PP_LATENCY).unwrap();
    let out = ctrl.step(&idle(depth)).unwrap();
    assert!(out.acc_clear);
    assert_eq!(ctrl.state(), RunState::Ready);
    ctrl
}

/// Tests the reset state.
#[test]
fn test_prepare_goes_to_ready() {
    let mut ctrl = RunController::new(16, PP_LATENCY).unwrap();
    assert_eq!(ctrl.state(), RunState::Prepare);
    // start during Prepare is ignored
    let out = ctrl
        .step(&RunInputs {
            start: true,
            madd4_inputs_ready: true,
            ..idle(2)
        })
        .unwrap();
    assert!(!out.madd4_start);
    assert_eq!(ctrl.state(), RunState::Ready);
    assert_eq!(ctrl.started(), 0);
    assert_eq!(ctrl.input_depth(), 2);
}

/// Tests the depth-1 boundary: one issue, one retire, no re-issue.
#[test]
fn test_depth_one_run() {
    let mut ctrl = prepared(1);
    let mut states = vec![ctrl.state()];

    // cycle 1: start, word ready
    let out = ctrl
        .step(&RunInputs {
            start: true,
            madd4_inputs_ready: true,
            ..idle(1)
        })
        .unwrap();
    assert!(out.madd4_start);
    assert_eq!(ctrl.started(), 1);
    states.push(ctrl.state());

    // cycle 2: inputs still claim ready, but the run is fully issued
    let out = ctrl
        .step(&RunInputs {
            madd4_inputs_ready: true,
            ..idle(1)
        })
        .unwrap();
    assert!(!out.madd4_start);
    assert!(!out.acc_add_en);
    assert_eq!(ctrl.started(), 1);
    states.push(ctrl.state());

    // cycle 3: the result issued on cycle 1 retires and goes straight on
    let out = ctrl
        .step(&RunInputs {
            madd4_inputs_ready: true,
            madd4_result: 8,
            ..idle(1)
        })
        .unwrap();
    assert!(!out.madd4_start);
    assert!(out.acc_add_en);
    assert!(out.acc_clear);
    assert!(out.pp_start);
    assert_eq!(out.pp_accumulator, 8);
    assert_eq!(ctrl.started(), 0);
    assert_eq!(ctrl.retired(), 0);
    assert_eq!(ctrl.accumulator(), 0);
    states.push(ctrl.state());

    // cycles 4..6: waiting on the post-processor
    for _ in 1..PP_LATENCY {
        let out = ctrl.step(&idle(1)).unwrap();
        assert!(!out.done);
        states.push(ctrl.state());
    }
    let out = ctrl
        .step(&RunInputs {
            pp_result: 42,
            ..idle(1)
        })
        .unwrap();
    assert!(out.done);
    assert_eq!(out.output, 42);
    states.push(ctrl.state());

    assert_eq!(
        states,
        vec![
            RunState::Ready,
            RunState::Run,
            RunState::WaitAccumulate,
            RunState::WaitPostProcess,
            RunState::WaitPostProcess,
            RunState::WaitPostProcess,
            RunState::Ready,
        ]
    );
}

/// Tests that the final sum uses the accumulator look-ahead.
#[test]
fn test_last_retire_forwards_lookahead_sum() {
    let mut ctrl = prepared(2);
    let ready = |result| RunInputs {
        madd4_inputs_ready: true,
        madd4_result: result,
        ..idle(2)
    };

    ctrl.step(&RunInputs {
        start: true,
        ..ready(0)
    })
    .unwrap();
    let out = ctrl.step(&ready(0)).unwrap();
    assert!(out.madd4_start);
    assert_eq!(ctrl.state(), RunState::WaitAccumulate);

    let out = ctrl.step(&ready(10)).unwrap();
    assert!(out.acc_add_en);
    assert!(!out.pp_start);
    assert_eq!(ctrl.accumulator(), 10);
    assert_eq!(ctrl.retired(), 1);

    let out = ctrl.step(&ready(52)).unwrap();
    assert!(out.pp_start);
    assert_eq!(out.pp_accumulator, 62);
    assert_eq!(ctrl.state(), RunState::WaitPostProcess);
}

/// Tests that issue stalls while inputs are not ready.
#[test]
fn test_issue_stalls_without_ready() {
    let mut ctrl = prepared(2);
    let out = ctrl
        .step(&RunInputs {
            start: true,
            ..idle(2)
        })
        .unwrap();
    assert!(!out.madd4_start);
    assert_eq!(ctrl.state(), RunState::Run);

    for _ in 0..10 {
        let out = ctrl.step(&idle(2)).unwrap();
        assert!(!out.madd4_start);
        assert_eq!(ctrl.state(), RunState::Run);
        assert_eq!(ctrl.started(), 0);
        assert_eq!(ctrl.madd4_in_flight(), 0);
    }
}

/// Tests that a zero depth is rejected and leaves the controller in Ready.
#[test]
fn test_zero_depth_rejected() {
    let mut ctrl = prepared(0);
    let result = ctrl.step(&RunInputs {
        start: true,
        madd4_inputs_ready: true,
        ..idle(0)
    });
    assert!(matches!(result, Err(SimError::ZeroInputDepth)));
    assert_eq!(ctrl.state(), RunState::Ready);
    assert_eq!(ctrl.started(), 0);
    assert_eq!(ctrl.madd4_in_flight(), 0);
}

/// Tests that depths above the configured maximum are rejected.
#[test]
fn test_depth_above_max_rejected() {
    let mut ctrl = prepared(17);
    let result = ctrl.step(&RunInputs {
        start: true,
        ..idle(17)
    });
    assert!(matches!(
        result,
        Err(SimError::InputDepthOutOfRange { depth: 17, max: 16 })
    ));
}

/// Tests that `start` only takes effect in Ready.
#[test]
fn test_start_ignored_mid_run() {
    let mut ctrl = prepared(3);
    let go = RunInputs {
        start: true,
        madd4_inputs_ready: true,
        ..idle(3)
    };
    ctrl.step(&go).unwrap();
    ctrl.step(&go).unwrap();
    assert_eq!(ctrl.state(), RunState::Run);
    assert_eq!(ctrl.started(), 2);

    ctrl.step(&go).unwrap();
    assert_eq!(ctrl.state(), RunState::WaitAccumulate);
    assert_eq!(ctrl.started(), 3);

    // Holding start through the drain neither issues nor restarts.
    let out = ctrl.step(&go).unwrap();
    assert!(!out.madd4_start);
    assert_eq!(ctrl.started(), 3);
}

/// Tests that counters respect retired <= started <= depth under stalls.
#[test]
fn test_counter_invariants() {
    let depth = 5;
    let mut ctrl = prepared(depth);
    let pattern = [true, false, true, true, false, false, true, true];
    let mut cycle = 0usize;
    let mut start = true;
    while ctrl.state() != RunState::WaitPostProcess {
        ctrl.step(&RunInputs {
            start,
            madd4_inputs_ready: pattern[cycle % pattern.len()],
            madd4_result: 1,
            ..idle(depth)
        })
        .unwrap();
        start = false;
        cycle += 1;
        if ctrl.state() != RunState::WaitPostProcess {
            assert!(ctrl.retired() <= ctrl.started());
            assert!(ctrl.started() <= depth);
        }
        assert!(cycle < 100);
    }
}

/// Tests that reset drops a run in progress.
#[test]
fn test_reset() {
    let mut ctrl = prepared(4);
    ctrl.step(&RunInputs {
        start: true,
        madd4_inputs_ready: true,
        ..idle(4)
    })
    .unwrap();
    ctrl.reset();
    assert_eq!(ctrl.state(), RunState::Prepare);
    assert_eq!(ctrl.started(), 0);
    assert_eq!(ctrl.madd4_in_flight(), 0);
}
