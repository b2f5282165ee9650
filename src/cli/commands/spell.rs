use crate::cli::core::{usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::speller::spell_integer;

const SPELL_USAGE: &str = "spell <amount>";
const WORDS_USAGE: &str = "words <integer>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "spell",
            "Write an amount out in words",
            SPELL_USAGE,
            cmd_spell,
        ),
        CommandEntry::new(
            "words",
            "Write a whole number out in words",
            WORDS_USAGE,
            cmd_words,
        ),
    ]
}

/// Joins the arguments so `spell 1 234,50` works without quotes.
fn cmd_spell(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage_error(SPELL_USAGE));
    }
    let raw = args.join(" ");
    let spelled = context.speller().spell_str(&raw)?;
    output::plain(spelled);
    Ok(())
}

fn cmd_words(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error(WORDS_USAGE));
    };
    let value: u64 = raw.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a whole number", raw))
    })?;
    output::plain(spell_integer(value)?);
    Ok(())
}
