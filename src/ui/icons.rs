pub struct Icons;

impl Icons {
    pub const STAR: &str = "🌟";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    pub const ROBOT: &str = "🤖";
    pub const BOOKS: &str = "📚";
    pub const PARTY: &str = "🎉";
    pub const SCHOOL: &str = "🏫";
    pub const GLOBE: &str = "🌍";
}
