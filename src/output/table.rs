//! Table rendering for terminal output

use std::fmt::{self, Write};

use colored::{ColoredString, Colorize};

use crate::compatibility::check::{CheckResult, Status};
use crate::compatibility::history::{ComponentDetail, ComponentHistory, SupportedVersions};
use crate::compatibility::upgrade::UpgradePlan;
use crate::output::TableReport;

const WIDE_RULE: usize = 70;
const RULE: usize = 60;

fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}

fn status_label(status: Status) -> ColoredString {
    match status {
        Status::Compatible => "✅ Compatible".green(),
        Status::Incompatible => "❌ Incompatible".red(),
        Status::Unknown => "❓ Unknown".yellow(),
    }
}

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => "-",
    }
}

impl TableReport for CheckResult {
    fn write_table(&self, out: &mut dyn Write) -> fmt::Result {
        let show_current = self.components.iter().any(|c| c.current.is_some());

        writeln!(out)?;
        writeln!(
            out,
            "{}",
            format!("Kubernetes Version: {}", self.k8s_version).bold()
        )?;
        writeln!(out, "{}\n", rule('=', RULE))?;

        let mut header = format!("{:<28} {:<15} {:<15} ", "COMPONENT", "REQUIRED", "RECOMMENDED");
        if show_current {
            header.push_str(&format!("{:<15} ", "CURRENT"));
        }
        header.push_str("STATUS");
        writeln!(out, "{}", header.bold())?;
        writeln!(out, "{}", rule('-', WIDE_RULE))?;

        for component in &self.components {
            let required = if component.required.is_empty() {
                component.skew_policy.as_deref().unwrap_or_default()
            } else {
                component.required.as_str()
            };
            write!(
                out,
                "{:<28} {:<15} {:<15} ",
                component.name,
                required,
                or_dash(component.recommended.as_deref())
            )?;
            if show_current {
                write!(out, "{:<15} ", or_dash(component.current.as_deref()))?;
            }
            writeln!(out, "{}", status_label(component.status))?;
        }

        let summary = &self.summary;
        writeln!(out, "\n{}", rule('-', WIDE_RULE))?;
        writeln!(
            out,
            "Summary: {} components checked",
            summary.total_components
        )?;
        if summary.incompatible_count > 0 {
            writeln!(
                out,
                "  ⚠️  {}",
                format!("{} incompatible", summary.incompatible_count).red()
            )?;
        }
        if summary.unknown_count > 0 {
            writeln!(out, "  ❓ {} unknown", summary.unknown_count)?;
        }
        if summary.all_compatible() {
            writeln!(out, "  ✅ {}", "All components compatible".green())?;
        }

        Ok(())
    }
}

impl TableReport for UpgradePlan {
    fn write_table(&self, out: &mut dyn Write) -> fmt::Result {

        writeln!(out)?;
        writeln!(
            out,
            "{}",
            format!("Upgrade Path: {} → {}", self.from, self.to).bold()
        )?;
        writeln!(out, "{}\n", rule('=', RULE))?;

        writeln!(out, "📋 Recommended Upgrade Steps:")?;
        writeln!(out, "{}", rule('-', RULE))?;
        for step in &self.steps {
            writeln!(out, "  Step {}: {} → {}", step.step, step.from, step.to)?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "⚠️  Note: Kubernetes supports upgrading one minor version at a time."
        )?;
        writeln!(out)?;

        writeln!(out, "📦 Component Version Changes:")?;
        writeln!(out, "{}", rule('-', RULE))?;
        writeln!(out, "{:<25} {:<15} {:<15}", "COMPONENT", self.from, self.to)?;
        writeln!(out, "{}", rule('-', RULE))?;
        for change in &self.component_changes {
            let marker = if change.changed { " ⬆️" } else { "" };
            writeln!(
                out,
                "{:<25} {:<15} {:<15}{}",
                change.name, change.from, change.to, marker
            )?;
        }
        writeln!(out)?;

        writeln!(out, "📌 Version Skew Policy Reminders:")?;
        writeln!(out, "{}", rule('-', RULE))?;
        for reminder in &self.reminders {
            writeln!(out, "  • {reminder}")?;
        }

        Ok(())
    }
}

impl TableReport for ComponentDetail {
    fn write_table(&self, out: &mut dyn Write) -> fmt::Result {
        let info = &self.info;

        writeln!(out)?;
        writeln!(
            out,
            "{} compatibility for Kubernetes {}:",
            info.name.bold(),
            self.k8s_version
        )?;
        writeln!(out, "{}", rule('-', 50))?;

        let fields = [
            ("Version:", info.version.as_deref()),
            ("Recommended:", info.recommended.as_deref()),
            ("Min Version:", info.min_version.as_deref()),
            ("Max Version:", info.max_version.as_deref()),
            ("Skew Policy:", info.skew_policy.as_deref()),
            ("Notes:", info.notes.as_deref()),
        ];
        for (label, value) in fields {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                writeln!(out, "  {label:<12} {value}")?;
            }
        }

        Ok(())
    }
}

impl TableReport for ComponentHistory {
    fn write_table(&self, out: &mut dyn Write) -> fmt::Result {

        writeln!(out)?;
        writeln!(
            out,
            "{} versions across Kubernetes releases:",
            self.component.bold()
        )?;
        writeln!(out, "{}", rule('-', RULE))?;
        writeln!(
            out,
            "{:<15} {:<15} {:<15}",
            "K8S VERSION", "VERSION", "RECOMMENDED"
        )?;
        writeln!(out, "{}", rule('-', RULE))?;

        for row in &self.releases {
            let version = match (&row.version, &row.skew_policy) {
                (Some(version), _) => version.as_str(),
                (None, Some(_)) => "(skew policy)",
                (None, None) => "-",
            };
            writeln!(
                out,
                "{:<15} {:<15} {:<15}",
                row.k8s_version,
                version,
                or_dash(row.recommended.as_deref())
            )?;
        }

        Ok(())
    }
}

impl TableReport for SupportedVersions {
    fn write_table(&self, out: &mut dyn Write) -> fmt::Result {
        writeln!(out, "Supported Kubernetes versions:")?;
        for version in &self.versions {
            writeln!(out, "  - {version}")?;
        }
        Ok(())
    }
}
