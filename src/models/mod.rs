pub mod difficulty;
pub mod loaders;
pub mod plan;
pub mod problem;

pub use difficulty::Difficulty;
pub use loaders::{load_all_problem_banks, load_paper_plan, load_problem_bank};
pub use plan::{AssembleMode, PaperPlan, Placement};
pub use problem::{Problem, ProblemBank, ProblemId};
