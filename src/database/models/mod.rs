pub mod research_plan;

pub use research_plan::ResearchPlan;
