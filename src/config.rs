use crate::error::ConfigError;

/// 每页允许的最大栏数
pub const MAX_COLUMNS: u8 = 2;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库 TOML 文件存放目录
    pub catalog_folder: String,
    /// 组卷计划文件
    pub plan_file: String,
    /// 排版结果（打印预览数据）输出文件
    pub output_plan_file: String,
    /// 输出日志文件
    pub output_log_file: String,
    /// 无法解析的题目写入此文件
    pub warn_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 新建页面的默认栏数
    pub default_columns: u8,
    /// 自动组卷时单栏可容纳的估算高度
    pub lane_capacity: f64,
    /// 是否将排版结果提交到组卷接口
    pub submit_paper: bool,
    // --- 组卷 API 配置 ---
    pub paper_api_base_url: String,
    pub paper_api_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_folder: "catalog".to_string(),
            plan_file: "paper.toml".to_string(),
            output_plan_file: "print_plan.json".to_string(),
            output_log_file: "output.txt".to_string(),
            warn_file: "warn.txt".to_string(),
            verbose_logging: false,
            default_columns: MAX_COLUMNS,
            lane_capacity: 12.0,
            submit_paper: false,
            paper_api_base_url: "http://localhost:8080".to_string(),
            paper_api_token: String::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            catalog_folder: std::env::var("CATALOG_FOLDER").unwrap_or(default.catalog_folder),
            plan_file: std::env::var("PLAN_FILE").unwrap_or(default.plan_file),
            output_plan_file: std::env::var("OUTPUT_PLAN_FILE").unwrap_or(default.output_plan_file),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            warn_file: std::env::var("WARN_FILE").unwrap_or(default.warn_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            default_columns: std::env::var("DEFAULT_COLUMNS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.default_columns),
            lane_capacity: std::env::var("LANE_CAPACITY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.lane_capacity),
            submit_paper: std::env::var("SUBMIT_PAPER").ok().and_then(|v| v.parse().ok()).unwrap_or(default.submit_paper),
            paper_api_base_url: std::env::var("PAPER_API_BASE_URL").unwrap_or(default.paper_api_base_url),
            paper_api_token: std::env::var("PAPER_API_TOKEN").unwrap_or(default.paper_api_token),
        }
    }

    /// 检查配置值是否在允许范围内
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_COLUMNS).contains(&self.default_columns) {
            return Err(ConfigError::OutOfRange {
                name: "DEFAULT_COLUMNS".to_string(),
                value: self.default_columns.to_string(),
                expected: format!("1..={}", MAX_COLUMNS),
            });
        }
        if !(self.lane_capacity.is_finite() && self.lane_capacity > 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "LANE_CAPACITY".to_string(),
                value: self.lane_capacity.to_string(),
                expected: "> 0".to_string(),
            });
        }
        if self.submit_paper && self.paper_api_base_url.trim().is_empty() {
            return Err(ConfigError::OutOfRange {
                name: "PAPER_API_BASE_URL".to_string(),
                value: String::new(),
                expected: "非空地址".to_string(),
            });
        }
        Ok(())
    }
}
