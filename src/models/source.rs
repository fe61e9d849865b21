/// 评论来源站点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SiteTag {
    G2,
    Capterra,
    TrustRadius,
}

/// 小写标签 → 站点，命令行参数不区分大小写
static SOURCE_TAGS: phf::Map<&'static str, SiteTag> = phf::phf_map! {
    "g2" => SiteTag::G2,
    "capterra" => SiteTag::Capterra,
    "trustradius" => SiteTag::TrustRadius,
};

impl SiteTag {
    /// 全部支持的站点
    pub const ALL: [SiteTag; 3] = [SiteTag::G2, SiteTag::Capterra, SiteTag::TrustRadius];

    /// 输出记录中使用的显示名称
    pub fn name(self) -> &'static str {
        match self {
            SiteTag::G2 => "G2",
            SiteTag::Capterra => "Capterra",
            SiteTag::TrustRadius => "TrustRadius",
        }
    }

    /// 命令行与文件名中使用的小写标签
    pub fn tag(self) -> &'static str {
        match self {
            SiteTag::G2 => "g2",
            SiteTag::Capterra => "capterra",
            SiteTag::TrustRadius => "trustradius",
        }
    }

    /// 尝试从字符串解析站点（忽略大小写和首尾空白）
    pub fn from_tag(s: &str) -> Option<Self> {
        SOURCE_TAGS.get(s.trim().to_ascii_lowercase().as_str()).copied()
    }
}

impl std::str::FromStr for SiteTag {
    type Err = crate::error::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| crate::error::AppError::UnknownSource(s.to_string()))
    }
}

impl std::fmt::Display for SiteTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
