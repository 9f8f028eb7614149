use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 题目难度等级（接口返回 "1".."5"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub enum Difficulty {
    /// 容易
    Easy = 1,
    /// 较易
    FairlyEasy = 2,
    /// 中等
    #[default]
    Medium = 3,
    /// 较难
    FairlyHard = 4,
    /// 困难
    Hard = 5,
}

static LEVELS: phf::Map<&'static str, Difficulty> = phf_map! {
    "1" => Difficulty::Easy,
    "2" => Difficulty::FairlyEasy,
    "3" => Difficulty::Medium,
    "4" => Difficulty::FairlyHard,
    "5" => Difficulty::Hard,
    "容易" => Difficulty::Easy,
    "较易" => Difficulty::FairlyEasy,
    "中等" => Difficulty::Medium,
    "较难" => Difficulty::FairlyHard,
    "困难" => Difficulty::Hard,
};

impl Difficulty {
    /// 获取等级代码
    pub fn level(self) -> u8 {
        self as u8
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "容易",
            Difficulty::FairlyEasy => "较易",
            Difficulty::Medium => "中等",
            Difficulty::FairlyHard => "较难",
            Difficulty::Hard => "困难",
        }
    }

    /// 从代码或中文名称解析难度
    pub fn parse(s: &str) -> Option<Self> {
        LEVELS.get(s.trim()).copied()
    }

    pub fn from_level(level: u64) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::FairlyEasy),
            3 => Some(Difficulty::Medium),
            4 => Some(Difficulty::FairlyHard),
            5 => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> Self {
        d.level().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// 难度可以写成字符串也可以写成整数
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Error, Visitor};

        struct DifficultyVisitor;

        impl<'de> Visitor<'de> for DifficultyVisitor {
            type Value = Difficulty;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a difficulty level 1..5 as string or integer")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Difficulty::parse(value)
                    .ok_or_else(|| E::custom(format!("未知的难度等级: {}", value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: Error,
            {
                u64::try_from(value)
                    .ok()
                    .and_then(Difficulty::from_level)
                    .ok_or_else(|| E::custom(format!("未知的难度等级: {}", value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: Error,
            {
                Difficulty::from_level(value)
                    .ok_or_else(|| E::custom(format!("未知的难度等级: {}", value)))
            }
        }

        deserializer.deserialize_any(DifficultyVisitor)
    }
}
