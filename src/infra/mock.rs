use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use crate::domain::ticket::{
    FieldCatalog, FieldDescriptor, ProjectSummary, RemoteUser, Sprint, Ticket,
};

/// The extension fields every synthesized ticket carries, mirroring the
/// custom-field IDs the live backend exposes.
pub const EXTENSION_FIELDS: [&str; 12] = [
    "customfield_10001",
    "customfield_10002",
    "customfield_10003",
    "customfield_10004",
    "customfield_10005",
    "customfield_10006",
    "customfield_10007",
    "customfield_10008",
    "customfield_10009",
    "customfield_10010",
    "customfield_10011",
    "customfield_10012",
];

const SUMMARY_STEMS: [&str; 8] = [
    "Stabilize checkout retries",
    "Migrate billing exports to async jobs",
    "Reduce cold-start latency on search",
    "Harden webhook signature checks",
    "Backfill missing audit events",
    "Split the notifications worker",
    "Upgrade the payments SDK",
    "Close gaps in session expiry handling",
];

const PRIORITIES: [&str; 5] = ["Highest", "High", "Medium", "Low", "Lowest"];
const STATUSES: [&str; 4] = ["To Do", "In Progress", "In Review", "Done"];
const ISSUE_TYPES: [&str; 4] = ["Bug", "Improvement", "New Feature", "Task"];
const TEAMS: [&str; 4] = ["Platform", "Payments", "Mobile", "Data"];
const CUSTOMERS: [&str; 4] = ["Acme Corp", "Globex", "Initech", "Umbrella"];
const LABELS: [&str; 5] = ["backend", "frontend", "infra", "tech-debt", "customer-request"];
const DECAY_PROFILES: [&str; 3] = ["No timing impact", "Slowly degrading", "Drops steeply"];
const STORY_POINTS: [u64; 6] = [1, 2, 3, 5, 8, 13];
const SHIRT_SIZES: [&str; 5] = ["XS", "S", "M", "L", "XL"];

const SUMMARY_LIMIT: usize = 100;

/// Produces schema-compatible fake payloads when the live backend is out of
/// reach. The RNG is owned and seedable so tests can pin the shape down.
pub struct Synthesizer {
    rng: StdRng,
}

impl Synthesizer {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A batch of 2-8 tickets whose summaries weave in the caller's context.
    pub fn tickets(&mut self, context: &str) -> Vec<Ticket> {
        let count = self.rng.gen_range(2..=8);
        let key_base = self.rng.gen_range(1000..9000);

        (0..count)
            .map(|offset| self.ticket(key_base + offset, context))
            .collect()
    }

    fn ticket(&mut self, key_number: u64, context: &str) -> Ticket {
        let created = Utc::now();
        let duedate = created + Duration::days(self.rng.gen_range(1..=30));

        let fields = json!({
            "summary": self.summary(context),
            "priority": {"name": self.pick(&PRIORITIES)},
            "status": {"name": self.pick(&STATUSES)},
            "issuetype": {"name": self.pick(&ISSUE_TYPES)},
            "created": created.to_rfc3339(),
            "duedate": duedate.format("%Y-%m-%d").to_string(),
            "labels": [self.pick(&LABELS)],
            "customfield_10001": self.rng.gen_range(10_000..60_000_u32),
            "customfield_10002": self.rng.gen_range(0..=10_u32),
            "customfield_10003": self.rng.gen_range(0..=5_u32),
            "customfield_10004": self.pick(&DECAY_PROFILES),
            "customfield_10005": self.rng.gen_range(1..=10_u32),
            "customfield_10006": self.rng.gen_range(1..=8_u32),
            "customfield_10007": self.pick(&STORY_POINTS),
            "customfield_10008": self.pick(&TEAMS),
            "customfield_10009": self.pick(&CUSTOMERS),
            "customfield_10010": self.pick(&LABELS),
            "customfield_10011": {"value": self.pick(&SHIRT_SIZES)},
            "customfield_10012": (created + Duration::days(self.rng.gen_range(30..=90)))
                .format("%Y-%m-%d")
                .to_string(),
        });

        Ticket {
            key: format!("DEMO-{key_number}"),
            fields,
        }
    }

    fn summary(&mut self, context: &str) -> String {
        let stem = self.pick(&SUMMARY_STEMS);
        let summary = if context.trim().is_empty() {
            stem.to_string()
        } else {
            format!("{stem}: {}", context.trim())
        };
        summary.chars().take(SUMMARY_LIMIT).collect()
    }

    pub fn field_catalog(&mut self) -> FieldCatalog {
        let custom_names = [
            "Business Value",
            "Time Criticality",
            "Risk Reduction",
            "Decay Profile",
            "Job Size",
            "Effort Estimate",
            "Story Points",
            "Team",
            "Customer",
            "Area Label",
            "T-Shirt Size",
            "Target Date",
        ];
        let custom = EXTENSION_FIELDS
            .iter()
            .zip(custom_names)
            .map(|(id, name)| FieldDescriptor {
                id: id.to_string(),
                name: name.to_string(),
                custom: true,
                schema: None,
            })
            .collect();

        let system = ["summary", "status", "priority", "issuetype", "created", "duedate"]
            .iter()
            .map(|id| FieldDescriptor {
                id: id.to_string(),
                name: title_case(id),
                custom: false,
                schema: None,
            })
            .collect();

        FieldCatalog { custom, system }
    }

    pub fn projects(&mut self) -> Vec<ProjectSummary> {
        vec![
            ProjectSummary {
                id: "10000".to_string(),
                key: "DEMO".to_string(),
                name: "Demo Delivery".to_string(),
                project_type_key: Some("software".to_string()),
            },
            ProjectSummary {
                id: "10001".to_string(),
                key: "OPS".to_string(),
                name: "Operations Backlog".to_string(),
                project_type_key: Some("software".to_string()),
            },
        ]
    }

    pub fn sprints(&mut self) -> Vec<Sprint> {
        let base = self.rng.gen_range(1..=40);
        let today = Utc::now();
        ["closed", "active", "future"]
            .iter()
            .enumerate()
            .map(|(offset, state)| {
                let number = base + offset as u64;
                let start = today + Duration::weeks(2 * offset as i64) - Duration::weeks(2);
                Sprint {
                    id: number,
                    name: format!("Sprint {number}"),
                    state: state.to_string(),
                    start_date: Some(start.format("%Y-%m-%d").to_string()),
                    end_date: Some((start + Duration::weeks(2)).format("%Y-%m-%d").to_string()),
                }
            })
            .collect()
    }

    pub fn user(&mut self) -> RemoteUser {
        RemoteUser {
            account_id: Some("mock-account".to_string()),
            display_name: Some("Demo User".to_string()),
            email_address: Some("demo@example.com".to_string()),
        }
    }

    fn pick<T: Copy>(&mut self, pool: &[T]) -> T {
        pool[self.rng.gen_range(0..pool.len())]
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_stays_in_bounds() {
        for seed in 0..20 {
            let mut synth = Synthesizer::with_seed(seed);
            let tickets = synth.tickets("project = DEMO");
            assert!((2..=8).contains(&tickets.len()), "seed {seed}");
        }
    }

    #[test]
    fn every_ticket_carries_key_and_full_extension_set() {
        let mut synth = Synthesizer::with_seed(7);
        for ticket in synth.tickets("DEMO-1,DEMO-2") {
            assert!(ticket.key.starts_with("DEMO-"));
            let fields = ticket.fields.as_object().expect("fields object");
            for id in EXTENSION_FIELDS {
                assert!(fields.contains_key(id), "missing {id}");
            }
            for core in ["summary", "priority", "status", "issuetype", "created", "duedate"] {
                assert!(fields.contains_key(core), "missing {core}");
            }
        }
    }

    #[test]
    fn summaries_weave_in_context_and_stay_bounded() {
        let mut synth = Synthesizer::with_seed(3);
        let long_context = "x".repeat(300);
        let tickets = synth.tickets(&long_context);
        assert!(tickets[0].fields["summary"].as_str().unwrap().chars().count() <= 100);

        let mut synth = Synthesizer::with_seed(3);
        let tickets = synth.tickets("key in (AB-1)");
        assert!(tickets[0].fields["summary"].as_str().unwrap().contains("key in (AB-1)"));
    }

    #[test]
    fn catalog_marks_extension_fields_custom() {
        let mut synth = Synthesizer::with_seed(1);
        let catalog = synth.field_catalog();
        assert_eq!(catalog.custom.len(), EXTENSION_FIELDS.len());
        assert!(catalog.custom.iter().all(|field| field.custom));
        assert!(catalog.system.iter().all(|field| !field.custom));
    }

    #[test]
    fn sprint_batch_covers_lifecycle_states() {
        let mut synth = Synthesizer::with_seed(11);
        let sprints = synth.sprints();
        let states: Vec<&str> = sprints.iter().map(|sprint| sprint.state.as_str()).collect();
        assert_eq!(states, ["closed", "active", "future"]);
    }
}
