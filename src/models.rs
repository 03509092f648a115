use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// 缺少配图时使用的占位图
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.png";

/// 新闻列表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Feed {
    #[default]
    Good, // 正面新闻
    Bad, // 负面新闻
}

impl Feed {
    /// 相对于服务地址的接口路径
    pub fn path(self) -> &'static str {
        match self {
            Feed::Good => "goodnewsjson",
            Feed::Bad => "badnewsjson",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Feed::Good => "好消息",
            Feed::Bad => "坏消息",
        }
    }

    /// 切换到另一个列表
    pub fn toggled(self) -> Self {
        match self {
            Feed::Good => Feed::Bad,
            Feed::Bad => Feed::Good,
        }
    }
}

impl std::str::FromStr for Feed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Feed::Good),
            "bad" => Ok(Feed::Bad),
            other => Err(format!("unknown feed `{other}` (expected `good` or `bad`)")),
        }
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feed::Good => f.write_str("good"),
            Feed::Bad => f.write_str("bad"),
        }
    }
}

/// 服务端返回的文章记录，接收后不再修改
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(
        default,
        rename = "imageUrl",
        alias = "url_to_image",
        alias = "urlToImage"
    )]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "publishedAt")]
    pub publish_time: Option<String>,
    #[serde(default)]
    pub polarity: Option<f64>,
    #[serde(default)]
    pub subjectivity: Option<f64>,
}

impl ArticleRecord {
    /// 配图地址，空白字符串视为缺失
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// 解析发布时间，兼容 `2017-06-01 12:30:00` 与 `2017-06-01T12:30:00Z`
    pub fn published(&self) -> Option<NaiveDateTime> {
        let raw = self.publish_time.as_deref()?.trim();
        let head = raw.get(..19).unwrap_or(raw);
        NaiveDateTime::parse_from_str(head, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

#[cfg(test)]
impl ArticleRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// JSON 中的 null 按默认值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
