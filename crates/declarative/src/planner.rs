//! Execution planner - builds resource execution plans

use crate::resource::{BoxedResource, Resource};

/// An execution plan: resources in the order they were declared
#[derive(Default)]
pub struct ExecutionPlan {
    resources: Vec<BoxedResource>,
}

impl ExecutionPlan {
    /// Create a new empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource to the plan
    pub fn add(&mut self, resource: BoxedResource) {
        self.resources.push(resource);
    }

    /// Resources in plan order
    pub fn resources(&self) -> &[BoxedResource] {
        &self.resources
    }

    /// Filter plan to only include resources matching a predicate
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&dyn Resource) -> bool,
    {
        Self {
            resources: self
                .resources
                .into_iter()
                .filter(|r| predicate(r.as_ref()))
                .collect(),
        }
    }

    /// Filter plan to only include resources matching a target pattern
    ///
    /// Target format: "type", "type.name" or a bare resource id.
    pub fn filter_by_target(self, target: Option<&str>) -> Self {
        match target {
            None => self,
            Some(t) => {
                let target = parse_target(t);
                self.filter(|r| matches_filter(r, &target))
            }
        }
    }

    /// Total number of resources in the plan
    pub fn total_resources(&self) -> usize {
        self.resources.len()
    }

    /// Check if plan is empty
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// A parsed target selector
#[derive(Debug, PartialEq, Eq)]
enum Target<'a> {
    /// "type.name"
    Qualified { resource_type: &'a str, name: &'a str },
    /// A bare word, matching either a resource type or a resource id
    Word(&'a str),
}

/// Parse a target string like "type.name"
fn parse_target(target: &str) -> Target<'_> {
    match target.split_once('.') {
        Some((resource_type, name)) if !resource_type.is_empty() && !name.is_empty() => {
            Target::Qualified {
                resource_type,
                name,
            }
        }
        _ => Target::Word(target),
    }
}

/// Check if a resource matches the filter criteria
fn matches_filter(resource: &dyn Resource, target: &Target<'_>) -> bool {
    match *target {
        Target::Qualified {
            resource_type,
            name,
        } => resource.resource_type() == resource_type && resource.id() == name,
        Target::Word(word) => resource.resource_type() == word || resource.id() == word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ApplyContext;
    use crate::types::{ApplyResult, ResourceState};
    use anyhow::Result;

    #[derive(Debug)]
    struct Named(&'static str);

    impl Resource for Named {
        fn id(&self) -> String {
            self.0.to_string()
        }

        fn description(&self) -> String {
            format!("Subnet {}", self.0)
        }

        fn resource_type(&self) -> &'static str {
            "subnet"
        }

        fn current_state(&self) -> Result<ResourceState> {
            Ok(ResourceState::Present)
        }

        fn desired_state(&self) -> ResourceState {
            ResourceState::Present
        }

        fn apply(&self, _ctx: &mut ApplyContext) -> Result<ApplyResult> {
            Ok(ApplyResult::NoChange)
        }
    }

    fn plan() -> ExecutionPlan {
        let mut plan = ExecutionPlan::new();
        plan.add(Box::new(Named("web")));
        plan.add(Box::new(Named("db")));
        plan
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("subnet"), Target::Word("subnet"));
        assert_eq!(
            parse_target("subnet.web"),
            Target::Qualified {
                resource_type: "subnet",
                name: "web"
            }
        );
        assert_eq!(parse_target(".web"), Target::Word(".web"));
    }

    #[test]
    fn test_filter_keeps_declaration_order() {
        let plan = plan().filter_by_target(Some("subnet"));
        let ids: Vec<_> = plan.resources().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["web", "db"]);
    }

    #[test]
    fn test_filter_by_name() {
        assert_eq!(plan().filter_by_target(Some("db")).total_resources(), 1);
        assert_eq!(plan().filter_by_target(Some("subnet.web")).total_resources(), 1);
        assert!(plan().filter_by_target(Some("network.web")).is_empty());
        assert_eq!(plan().filter_by_target(None).total_resources(), 2);
    }
}
