// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::GatewayError;
use crate::attempt_best_effort;
use crate::ports::MockErrorReporter;

#[test]
fn test_success_is_not_reported() {
    let reporter: MockErrorReporter = MockErrorReporter::new();

    let succeeded: bool =
        attempt_best_effort(&reporter, "close assessment", || Ok::<(), GatewayError>(()));

    assert!(succeeded);
}

#[test]
fn test_failure_is_reported_and_swallowed() {
    let mut reporter: MockErrorReporter = MockErrorReporter::new();
    reporter
        .expect_capture()
        .withf(|message| message.starts_with("close assessment: Not authorised"))
        .times(1)
        .return_const(());

    let succeeded: bool = attempt_best_effort(&reporter, "close assessment", || {
        Err(GatewayError::Unauthorized)
    });

    assert!(!succeeded);
}
