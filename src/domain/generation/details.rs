//! Chapter Details - 高级章节的结构化字段

use serde::{Deserialize, Serialize};

/// 高级章节表单（八个结构化字段）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChapterDetails {
    /// 场景与氛围
    pub setting: String,
    /// 主要角色
    pub main_characters: String,
    /// 关键情节
    pub plot_points: String,
    /// 角色成长
    pub character_development: String,
    /// 情绪节拍
    pub emotional_beats: String,
    /// 感官细节
    pub sensory_details: String,
    /// 对白
    pub dialogue: String,
    /// 伏笔
    pub foreshadowing: String,
}

impl ChapterDetails {
    /// 按固定标签拼接字段与主提示
    pub fn compose(&self, main_prompt: &str) -> String {
        format!(
            "Setting and Atmosphere: {}\n\
             Main Characters: {}\n\
             Key Plot Points: {}\n\
             Character Development: {}\n\
             Emotional Beats: {}\n\
             Sensory Details: {}\n\
             Dialogue: {}\n\
             Foreshadowing: {}\n\
             \n\
             Main Prompt: {}",
            self.setting,
            self.main_characters,
            self.plot_points,
            self.character_development,
            self.emotional_beats,
            self.sensory_details,
            self.dialogue,
            self.foreshadowing,
            main_prompt,
        )
    }
}
