pub mod toml_loader;

pub use toml_loader::{load_all_problem_banks, load_paper_plan, load_problem_bank};
