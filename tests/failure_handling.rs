//! Fail-fast abort semantics: the first failure stops the run, later
//! steps never start, and earlier side effects stay on disk.

mod helpers;

use helpers::{profile_in, MockRunner};
use scm_installer::{
    ExecutionStatus, InstallContext, InstallEngine, Pipeline, RunResult, StepState,
};

#[tokio::test]
async fn dependency_install_failure_aborts_before_any_service_command() {
    let tmp = tempfile::tempdir().unwrap();
    let install_root = tmp.path().join("install");
    let profile = profile_in(tmp.path());

    let mut pipeline = Pipeline::from_profile(&profile, &install_root);
    let runner = MockRunner::failing_on("pnpm install", 1);
    let invocations = runner.invocations();
    let engine = InstallEngine::new(runner);

    let mut ctx = InstallContext::new(install_root.clone());
    let result = engine.execute(&mut pipeline, &mut ctx).await;

    match result {
        RunResult::Aborted {
            step_number,
            step_id,
            reason,
        } => {
            assert_eq!(step_number, 4);
            assert_eq!(step_id, "install-dependencies");
            assert!(reason.contains("pnpm"));
            assert!(reason.contains("code 1"));
        }
        RunResult::Completed => panic!("expected the run to abort"),
    }

    assert_eq!(pipeline.state.status, ExecutionStatus::Aborted);

    // Steps 1-3 completed, step 4 failed, steps 5+ never left Pending.
    assert!(pipeline.states[..3]
        .iter()
        .all(|s| matches!(s, StepState::Completed { .. })));
    assert!(matches!(pipeline.states[3], StepState::Failed { .. }));
    assert!(pipeline.states[4..]
        .iter()
        .all(|s| matches!(s, StepState::Pending)));

    // No service-manager command was ever invoked.
    let invocations = invocations.lock().unwrap().clone();
    assert!(!invocations.iter().any(|line| line.contains("systemctl")));
    assert_eq!(invocations.last().unwrap(), "pnpm install --prod=false");

    // Prior side effects remain: the install root was created and is not
    // rolled back.
    assert!(install_root.is_dir());

    // The unit file step never ran.
    assert!(!tmp.path().join("snailycad-manager.service").exists());
}

#[tokio::test]
async fn first_step_command_failure_aborts_with_its_label() {
    let tmp = tempfile::tempdir().unwrap();
    let install_root = tmp.path().join("install");
    let profile = profile_in(tmp.path());

    let mut pipeline = Pipeline::from_profile(&profile, &install_root);
    let runner = MockRunner::failing_on("curl", 22);
    let invocations = runner.invocations();
    let engine = InstallEngine::new(runner);

    let mut ctx = InstallContext::new(install_root.clone());
    let result = engine.execute(&mut pipeline, &mut ctx).await;

    match result {
        RunResult::Aborted {
            step_number,
            step_id,
            ..
        } => {
            assert_eq!(step_number, 2);
            assert_eq!(step_id, "download-archive");
        }
        RunResult::Completed => panic!("expected the run to abort"),
    }

    // Only the download was attempted.
    assert_eq!(invocations.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn rerunning_over_an_existing_install_is_not_idempotent() {
    // Documented property: a second run repeats every side effect against
    // the existing directory rather than detecting the prior install.
    let tmp = tempfile::tempdir().unwrap();
    let install_root = tmp.path().join("install");
    let profile = profile_in(tmp.path());

    for _ in 0..2 {
        let mut pipeline = Pipeline::from_profile(&profile, &install_root);
        let engine = InstallEngine::new(MockRunner::succeeding());
        let mut ctx = InstallContext::new(install_root.clone());
        let result = engine.execute(&mut pipeline, &mut ctx).await;
        assert_eq!(result, RunResult::Completed);
    }

    // The second run overwrote the unit file in place.
    assert!(tmp.path().join("snailycad-manager.service").is_file());
}
