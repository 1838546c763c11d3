//! World clock plugin - current time across a fixed set of countries

use async_trait::async_trait;
use chrono::{DateTime, Local, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::application::context::CommandContext;
use crate::application::errors::CommandError;
use crate::domain::entities::{Command, CommandDescriptor, CommandHandler, CommandRegistry};
use crate::plugins::trait_def::Plugin;

const CATEGORY: &str = "utility";

/// Countries shown when no argument is given
const POPULAR: &[&str] = &["Kenya", "India", "USA (NY)", "UK", "UAE", "Japan", "Australia", "Germany", "China"];

const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryTime {
    pub country: &'static str,
    pub flag: &'static str,
    pub time_zone: Tz,
}

const fn entry(country: &'static str, flag: &'static str, time_zone: Tz) -> CountryTime {
    CountryTime { country, flag, time_zone }
}

pub const COUNTRY_TIMES: &[CountryTime] = &[
    entry("Kenya", "🇰🇪", Tz::Africa__Nairobi),
    entry("India", "🇮🇳", Tz::Asia__Kolkata),
    entry("USA (NY)", "🇺🇸", Tz::America__New_York),
    entry("UK", "🇬🇧", Tz::Europe__London),
    entry("UAE", "🇦🇪", Tz::Asia__Dubai),
    entry("Japan", "🇯🇵", Tz::Asia__Tokyo),
    entry("Australia", "🇦🇺", Tz::Australia__Sydney),
    entry("Brazil", "🇧🇷", Tz::America__Sao_Paulo),
    entry("China", "🇨🇳", Tz::Asia__Shanghai),
    entry("Germany", "🇩🇪", Tz::Europe__Berlin),
    entry("Russia", "🇷🇺", Tz::Europe__Moscow),
    entry("Egypt", "🇪🇬", Tz::Africa__Cairo),
    entry("South Africa", "🇿🇦", Tz::Africa__Johannesburg),
    entry("Canada (TO)", "🇨🇦", Tz::America__Toronto),
    entry("France", "🇫🇷", Tz::Europe__Paris),
    entry("Singapore", "🇸🇬", Tz::Asia__Singapore),
    entry("Pakistan", "🇵🇰", Tz::Asia__Karachi),
    entry("Nigeria", "🇳🇬", Tz::Africa__Lagos),
    entry("Mexico", "🇲🇽", Tz::America__Mexico_City),
    entry("Turkey", "🇹🇷", Tz::Europe__Istanbul),
];

impl CountryTime {
    fn local(&self, now: DateTime<Utc>) -> DateTime<Tz> {
        now.with_timezone(&self.time_zone)
    }

    /// `Mon, Oct 19, 2026, 3:04:05 PM`
    pub fn full_time(&self, now: DateTime<Utc>) -> String {
        self.local(now).format("%a, %b %-d, %Y, %-I:%M:%S %p").to_string()
    }

    /// `03:04 PM`
    pub fn short_time(&self, now: DateTime<Utc>) -> String {
        self.local(now).format("%I:%M %p").to_string()
    }

    /// `GMT+5:30`, taken from the offset in force at `now`
    pub fn gmt(&self, now: DateTime<Utc>) -> String {
        let seconds = self.local(now).offset().fix().local_minus_utc();
        let sign = if seconds < 0 { '-' } else { '+' };
        let minutes = seconds.abs() / 60;
        if minutes % 60 == 0 {
            format!("GMT{}{}", sign, minutes / 60)
        } else {
            format!("GMT{}{}:{:02}", sign, minutes / 60, minutes % 60)
        }
    }

    fn matches(&self, query: &str, now: DateTime<Utc>) -> bool {
        self.country.to_lowercase().contains(query)
            || self.time_zone.name().to_lowercase().contains(query)
            || self.gmt(now).to_lowercase().contains(query)
    }

    fn full_entry(&self, now: DateTime<Utc>) -> String {
        format!("{} *{}* ({})\n   ⏰ {}\n\n", self.flag, self.country, self.gmt(now), self.full_time(now))
    }
}

pub fn render_popular(now: DateTime<Utc>, prefix: &str) -> String {
    let mut out = String::from("🕒 *Current World Times*\n\n");
    for c in COUNTRY_TIMES.iter().filter(|c| POPULAR.contains(&c.country)) {
        out.push_str(&format!("{} *{}:* {} ({})\n", c.flag, c.country, c.short_time(now), c.gmt(now)));
    }
    out.push_str(&format!(
        "\n💡 Use *{p}time all* to see all countries or *{p}time [country]* to search specific timezone.",
        p = prefix
    ));
    out
}

pub fn render_all(now: DateTime<Utc>) -> String {
    let mut out = String::from("🕒 *World Time - All Countries*\n\n");
    for (index, c) in COUNTRY_TIMES.iter().enumerate() {
        out.push_str(&c.full_entry(now));
        if (index + 1) % 5 == 0 {
            out.push_str(DIVIDER);
        }
    }
    out
}

/// Case-insensitive search over country, zone and GMT label
pub fn render_search(query: &str, now: DateTime<Utc>, prefix: &str) -> String {
    let query = query.to_lowercase();
    let found: Vec<&CountryTime> = COUNTRY_TIMES.iter().filter(|c| c.matches(&query, now)).collect();

    if found.is_empty() {
        return format!(
            "❌ No country found matching \"{}\". Use *{}time all* to see all available countries.",
            query, prefix
        );
    }

    let mut out = format!("🔍 *Time Results for \"{}\"*\n\n", query);
    for c in found {
        out.push_str(&c.full_entry(now));
    }
    out
}

pub fn render_gmt(now: DateTime<Utc>) -> String {
    format!(
        "🌐 *GMT/UTC Time*\n\n\
         ⏰ {} GMT\n\
         📅 Unix Timestamp: {}\n\n\
         *GMT Time Zones:*\n\
         • GMT+0: London, Dublin\n\
         • GMT+1: Paris, Berlin\n\
         • GMT+2: Cairo, Johannesburg\n\
         • GMT+3: Nairobi, Moscow\n\
         • GMT+5:30: Mumbai, Delhi",
        now.format("%a, %b %-d, %Y, %H:%M"),
        now.timestamp()
    )
}

pub fn render_local<Z: TimeZone>(now: DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    format!("📱 *Your Local Time*\n\n⏰ {}", now.format("%A, %B %-d, %Y at %-I:%M:%S %p %Z"))
}

pub struct ClockPlugin {
    prefix: String,
}

impl ClockPlugin {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    fn time_usage(&self) -> String {
        format!("{p}time [country] or {p}time all", p = self.prefix)
    }
}

impl Plugin for ClockPlugin {
    fn name(&self) -> &str {
        "clock"
    }

    fn description(&self) -> &str {
        "World clock lookups"
    }

    fn commands(&self, _registered: &CommandRegistry) -> Vec<Command> {
        vec![
            Command::new(
                CommandDescriptor::new("time")
                    .with_aliases(["worldtime", "timezone", "clock"])
                    .with_description("Show current times in various countries around the world")
                    .with_category(CATEGORY)
                    .with_usage(self.time_usage()),
                WorldTime,
            ),
            Command::new(
                CommandDescriptor::new("mytime")
                    .with_aliases(["localtime", "now"])
                    .with_description("Show the local time of the bot host")
                    .with_category(CATEGORY),
                MyTime,
            ),
            Command::new(
                CommandDescriptor::new("gmt")
                    .with_aliases(["utc", "zulu"])
                    .with_description("Show current GMT/UTC time")
                    .with_category(CATEGORY),
                Gmt,
            ),
        ]
    }
}

struct WorldTime;

#[async_trait]
impl CommandHandler for WorldTime {
    async fn handle(&self, ctx: CommandContext) -> Result<(), CommandError> {
        let query = ctx.args.join(" ").to_lowercase();
        let now = Utc::now();

        let text = match query.as_str() {
            "" => render_popular(now, &ctx.prefix),
            "all" => render_all(now),
            q => render_search(q, now, &ctx.prefix),
        };
        ctx.reply(text).await?;
        Ok(())
    }
}

struct MyTime;

#[async_trait]
impl CommandHandler for MyTime {
    async fn handle(&self, ctx: CommandContext) -> Result<(), CommandError> {
        ctx.reply(render_local(Local::now())).await?;
        Ok(())
    }
}

struct Gmt;

#[async_trait]
impl CommandHandler for Gmt {
    async fn handle(&self, ctx: CommandContext) -> Result<(), CommandError> {
        ctx.reply(render_gmt(Utc::now())).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 4, 5).unwrap()
    }

    fn country(name: &str) -> &'static CountryTime {
        COUNTRY_TIMES.iter().find(|c| c.country == name).unwrap()
    }

    #[test]
    fn daylight_saving_follows_the_calendar() {
        let july = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap();
        let january = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();

        let ny = country("USA (NY)");
        assert_eq!(ny.short_time(july), "08:00 AM");
        assert_eq!(ny.gmt(july), "GMT-4");
        assert_eq!(ny.short_time(january), "07:00 AM");
        assert_eq!(ny.gmt(january), "GMT-5");

        assert_eq!(country("UK").short_time(july), "01:00 PM");
        assert_eq!(country("UK").gmt(january), "GMT+0");
        assert_eq!(country("Australia").gmt(january), "GMT+11");
        assert_eq!(country("Australia").gmt(july), "GMT+10");
        assert_eq!(country("India").gmt(july), "GMT+5:30");
    }

    #[test]
    fn usage_follows_prefix() {
        let commands = ClockPlugin::new("!").commands(&CommandRegistry::new());
        let time = commands.iter().find(|c| c.descriptor.pattern == "time").unwrap();
        assert_eq!(time.descriptor.usage.as_deref(), Some("!time [country] or !time all"));
    }

    #[test]
    fn formats_in_country_offset() {
        let india = country("India");
        assert_eq!(india.full_time(instant()), "Mon, Oct 19, 2026, 5:34:05 PM");
        assert_eq!(india.short_time(instant()), "05:34 PM");
    }

    #[test]
    fn popular_lists_nine_countries() {
        let text = render_popular(instant(), ".");
        assert_eq!(text.matches('\n').count() - 3, 9);
        assert!(text.contains("🇰🇪 *Kenya:* 03:04 PM (GMT+3)"));
        assert!(!text.contains("Brazil"));
    }

    #[test]
    fn all_has_divider_every_five() {
        let text = render_all(instant());
        assert_eq!(text.matches(DIVIDER).count(), 4);
        assert!(text.contains("Turkey"));
    }

    #[test]
    fn search_by_name_zone_and_label() {
        assert!(render_search("KEN", instant(), ".").contains("Kenya"));
        assert!(render_search("europe/paris", instant(), ".").contains("France"));
        let plus_eight = render_search("gmt+8", instant(), ".");
        assert!(plus_eight.contains("China") && plus_eight.contains("Singapore"));
    }

    #[test]
    fn search_miss_suggests_all() {
        let text = render_search("atlantis", instant(), "!");
        assert!(text.starts_with("❌ No country found matching \"atlantis\""));
        assert!(text.contains("*!time all*"));
    }

    #[test]
    fn gmt_shows_unix_timestamp() {
        let text = render_gmt(instant());
        assert!(text.contains("Mon, Oct 19, 2026, 12:04 GMT"));
        assert!(text.contains(&instant().timestamp().to_string()));
    }
}
