//! Types command: the session type filters for the loaded schedule.

use std::io::Write;

use anyhow::Result;

use sched_core::LoadState;

use super::util::ready;

pub fn run<W: Write>(writer: &mut W, state: &LoadState) -> Result<()> {
    let Some(schedule) = ready(writer, state)? else {
        return Ok(());
    };

    for option in schedule.filter_options() {
        writeln!(writer, "{:<12}{}", option.to_string(), option.label())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::ready as loaded;

    use insta::assert_snapshot;

    #[test]
    fn types_command_lists_options_in_first_seen_order() {
        let mut output = Vec::new();
        run(&mut output, &loaded()).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        all         All Sessions
        keynote     Keynotes
        talk        Talks
        service     Service Sessions
        workshop    Workshops
        sponsor     Sponsor Talks
        favorites   Favorites
        ");
    }
}
