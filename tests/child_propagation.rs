//! Behaviour tests for propagating root fields to descendant issues.

mod child_propagation_steps;

use child_propagation_steps::world::{PropagationWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/child_propagation.feature",
    name = "Labels reach every descendant"
)]
#[tokio::test(flavor = "multi_thread")]
async fn labels_reach_every_descendant(world: PropagationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/child_propagation.feature",
    name = "A root without the requested field changes nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn root_without_field_changes_nothing(world: PropagationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/child_propagation.feature",
    name = "A rejected child does not stop its siblings"
)]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_child_does_not_stop_siblings(world: PropagationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/child_propagation.feature",
    name = "A dry run only plans changes"
)]
#[tokio::test(flavor = "multi_thread")]
async fn dry_run_only_plans_changes(world: PropagationWorld) {
    let _ = world;
}
