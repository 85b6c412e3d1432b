//! Execution engine - applies resources one at a time in plan order

use crate::context::{ApplyContext, AutoConfirm, ConfirmCallback, NoProgress, ProgressCallback};
use crate::diff::compute_diffs;
use crate::planner::ExecutionPlan;
use crate::resource::Resource;
use crate::types::{ApplyResult, ExecuteOptions, ExecuteSummary};
use anyhow::Result;
use log::debug;

/// Execute a plan with the given options and callbacks
///
/// # Arguments
/// * `plan` - The execution plan to run
/// * `opts` - Execution options (dry_run, verbose)
/// * `progress` - Progress callback
/// * `confirm` - Confirmation callback, asked once before the first change
///
/// Resources are applied sequentially in plan order. A resource whose apply
/// fails is recorded as [`ApplyResult::Failed`] and the pass continues.
///
/// # Returns
/// Summary of execution results
pub fn execute<P, C>(
    plan: ExecutionPlan,
    opts: ExecuteOptions,
    progress: &mut P,
    confirm: &mut C,
) -> Result<ExecuteSummary>
where
    P: ProgressCallback,
    C: ConfirmCallback,
{
    let diffs = compute_diffs(plan.resources());
    let total_changes = diffs.len();
    let unchanged = plan.total_resources() - total_changes;
    debug!(
        "{} of {} resources need changes",
        total_changes,
        plan.total_resources()
    );

    if total_changes == 0 {
        return Ok(ExecuteSummary {
            no_change: plan.total_resources(),
            ..Default::default()
        });
    }

    if opts.dry_run {
        return Ok(ExecuteSummary {
            skipped: total_changes,
            no_change: unchanged,
            ..Default::default()
        });
    }

    let prompt = if total_changes == 1 {
        "Apply 1 change?".to_string()
    } else {
        format!("Apply {total_changes} changes?")
    };
    if !confirm.confirm(&prompt)? {
        return Ok(ExecuteSummary {
            declined: true,
            skipped: total_changes,
            no_change: unchanged,
            ..Default::default()
        });
    }

    let mut summary = ExecuteSummary::default();
    progress.on_pass_start(plan.total_resources());
    for resource in plan.resources() {
        progress.on_resource_start(&resource.id(), &resource.description());
        let result = apply_resource(resource.as_ref(), opts.verbose);
        progress.on_resource_complete(&resource.id(), &result);
        summary.add_result(&result);
    }
    progress.on_pass_complete();

    Ok(summary)
}

/// Apply a single resource
fn apply_resource(resource: &dyn Resource, verbose: bool) -> ApplyResult {
    let mut ctx = ApplyContext::new(false, verbose);

    match resource.apply(&mut ctx) {
        Ok(result) => result,
        Err(e) => ApplyResult::Failed {
            error: format!("{e:#}"),
        },
    }
}

/// Simple execution without callbacks
///
/// For basic use cases where you don't need progress or confirmation.
pub fn execute_simple(plan: ExecutionPlan, opts: ExecuteOptions) -> Result<ExecuteSummary> {
    execute(plan, opts, &mut NoProgress, &mut AutoConfirm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AutoDecline;
    use crate::types::ResourceState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct TestResource {
        id: String,
        should_change: bool,
        fail: bool,
        applied: Arc<AtomicUsize>,
    }

    impl TestResource {
        fn new(id: &str, should_change: bool, applied: &Arc<AtomicUsize>) -> Self {
            Self {
                id: id.into(),
                should_change,
                fail: false,
                applied: Arc::clone(applied),
            }
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }
    }

    impl Resource for TestResource {
        fn id(&self) -> String {
            self.id.clone()
        }

        fn description(&self) -> String {
            format!("Test resource {}", self.id)
        }

        fn resource_type(&self) -> &'static str {
            "test"
        }

        fn current_state(&self) -> Result<ResourceState> {
            if self.should_change {
                Ok(ResourceState::Absent)
            } else {
                Ok(ResourceState::Present)
            }
        }

        fn desired_state(&self) -> ResourceState {
            ResourceState::Present
        }

        fn apply(&self, ctx: &mut ApplyContext) -> Result<ApplyResult> {
            if ctx.dry_run {
                return Ok(ApplyResult::Skipped {
                    reason: "Dry run".into(),
                });
            }
            if !self.should_change {
                return Ok(ApplyResult::NoChange);
            }
            self.applied.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("remote refused {}", self.id);
            }
            Ok(ApplyResult::Created)
        }
    }

    /// Records the order in which resources start.
    #[derive(Default)]
    struct Recorder {
        started: Vec<String>,
        passes: usize,
    }

    impl ProgressCallback for Recorder {
        fn on_pass_start(&mut self, _count: usize) {
            self.passes += 1;
        }
        fn on_resource_start(&mut self, id: &str, _description: &str) {
            self.started.push(id.to_string());
        }
        fn on_resource_complete(&mut self, _id: &str, _result: &ApplyResult) {}
        fn on_pass_complete(&mut self) {}
    }

    /// Counts prompts and always accepts.
    #[derive(Default)]
    struct CountingConfirm(usize);

    impl ConfirmCallback for CountingConfirm {
        fn confirm(&mut self, _prompt: &str) -> Result<bool> {
            self.0 += 1;
            Ok(true)
        }
    }

    #[test]
    fn test_execute_empty_plan() {
        let result = execute_simple(ExecutionPlan::new(), ExecuteOptions::default()).unwrap();
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_execute_no_changes() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut plan = ExecutionPlan::new();
        plan.add(Box::new(TestResource::new("test1", false, &applied)));

        let result = execute_simple(plan, ExecuteOptions::default()).unwrap();
        assert_eq!(result.no_change, 1);
        assert_eq!(result.total_changes(), 0);
    }

    #[test]
    fn test_execute_in_order_with_single_confirmation() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut plan = ExecutionPlan::new();
        plan.add(Box::new(TestResource::new("b", true, &applied)));
        plan.add(Box::new(TestResource::new("a", false, &applied)));
        plan.add(Box::new(TestResource::new("c", true, &applied)));

        let mut progress = Recorder::default();
        let mut confirm = CountingConfirm::default();
        let result = execute(plan, ExecuteOptions::default(), &mut progress, &mut confirm).unwrap();

        assert_eq!(result.created, 2);
        assert_eq!(result.no_change, 1);
        assert_eq!(confirm.0, 1);
        assert_eq!(progress.passes, 1);
        assert_eq!(progress.started, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_failure_does_not_stop_the_pass() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut plan = ExecutionPlan::new();
        plan.add(Box::new(TestResource::new("bad", true, &applied).failing()));
        plan.add(Box::new(TestResource::new("good", true, &applied)));

        let result = execute_simple(plan, ExecuteOptions::default()).unwrap();
        assert_eq!(result.failed, 1);
        assert_eq!(result.created, 1);
        assert_eq!(applied.load(Ordering::SeqCst), 2);
        assert!(!result.is_success());
    }

    #[test]
    fn test_dry_run_applies_nothing() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut plan = ExecutionPlan::new();
        plan.add(Box::new(TestResource::new("test1", true, &applied)));

        let opts = ExecuteOptions {
            dry_run: true,
            ..Default::default()
        };
        let result = execute_simple(plan, opts).unwrap();
        assert_eq!(result.skipped, 1);
        assert!(!result.declined);
        assert_eq!(applied.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_declined_confirmation_skips_changes() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut plan = ExecutionPlan::new();
        plan.add(Box::new(TestResource::new("test1", true, &applied)));
        plan.add(Box::new(TestResource::new("test2", false, &applied)));

        let result = execute(
            plan,
            ExecuteOptions::default(),
            &mut NoProgress,
            &mut AutoDecline,
        )
        .unwrap();
        assert!(result.declined);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.no_change, 1);
        assert_eq!(applied.load(Ordering::SeqCst), 0);
    }
}
