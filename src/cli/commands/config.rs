use crate::cli::core::{usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const CONFIG_USAGE: &str = "config <show|set <key> <value>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change presentation and stamp duty settings",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output::section("Configuration");
            output::key_values(context.config().entries());
            output::info(format!(
                "Stored in {}",
                context.config_manager.config_path().display()
            ));
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            let mut updated = context.config().clone();
            updated.set(key, &value.join(" "))?;
            context.apply_config(updated)?;
            output::success(format!("Updated `{}`.", key));
            Ok(())
        }
        ["set", ..] => Err(usage_error(CONFIG_USAGE)),
        [other, ..] => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`; {}",
            other, CONFIG_USAGE
        ))),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::core::process_script;
    use crate::MonetaryAmount;

    #[test]
    fn set_updates_speller_and_persists() {
        let app = process_script(&["config set currency dinars", "config set marker **"]).unwrap();
        assert_eq!(app.config().currency_unit, "dinars");
        let spelled = app.speller().spell(MonetaryAmount::from_parts(3, 0).unwrap());
        assert_eq!(spelled.as_str(), "** trois dinars et zéro centimes.");

        let stored = app.config_manager.load().unwrap();
        assert_eq!(stored.marker, "**");
    }

    #[test]
    fn rejected_values_leave_config_untouched() {
        let app = process_script(&["config set stamp-rate 400", "config set nope 1"]).unwrap();
        assert_eq!(app.config(), &crate::config::Config::default());
    }
}
