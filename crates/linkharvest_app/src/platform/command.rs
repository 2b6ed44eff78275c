use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  html <path>        load an HTML file into the source buffer
  paste              read HTML from the console until a line with `.end`
  base <url>         set the base URL used for full links
  fetch <url>        fetch a listing page into the source buffer
  parse              extract links from the source buffer
  list               show the visible links
  query <text>       filter by title, link or region (no text clears it)
  facet <id>         toggle a region, file type or exclusion filter
  facets             show every filter and whether it is active
  clear-filters      drop all filters and the query
  toggle <n>         select/deselect the n-th visible link
  select-all         add all visible links to the selection
  select-visible     replace the selection with the visible links
  deselect-all       empty the selection
  selected           show the selected links
  remove <n>         remove the n-th selected link
  clear-selected     clear the selected list
  undo               undo the last selection change
  export             write the selected links to the export file
  copy               print the selected links for copying
  show-selected      toggle the selected list under `list`
  clear              reset everything
  help               show this text
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadHtml(PathBuf),
    Paste,
    Base(String),
    Fetch(String),
    Parse,
    List,
    Query(String),
    Facet(String),
    Facets,
    ClearFilters,
    /// 1-based position in the visible list.
    Toggle(usize),
    SelectAll,
    SelectVisible,
    DeselectAll,
    Selected,
    /// 1-based position in the selected list.
    Remove(usize),
    ClearSelected,
    Undo,
    Export,
    Copy,
    ShowSelected,
    Clear,
    Help,
    Quit,
}

/// Parses one console line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "html" => Command::LoadHtml(PathBuf::from(required(name, rest)?)),
        "paste" => Command::Paste,
        "base" => Command::Base(rest.to_string()),
        "fetch" => Command::Fetch(required(name, rest)?.to_string()),
        "parse" => Command::Parse,
        "list" | "ls" => Command::List,
        "query" | "search" => Command::Query(rest.to_string()),
        "facet" | "filter" => Command::Facet(required(name, rest)?.to_ascii_lowercase()),
        "facets" | "filters" => Command::Facets,
        "clear-filters" => Command::ClearFilters,
        "toggle" | "t" => Command::Toggle(position(name, rest)?),
        "select-all" => Command::SelectAll,
        "select-visible" => Command::SelectVisible,
        "deselect-all" => Command::DeselectAll,
        "selected" => Command::Selected,
        "remove" => Command::Remove(position(name, rest)?),
        "clear-selected" => Command::ClearSelected,
        "undo" | "u" => Command::Undo,
        "export" => Command::Export,
        "copy" => Command::Copy,
        "show-selected" => Command::ShowSelected,
        "clear" => Command::Clear,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

fn required<'a>(name: &str, rest: &'a str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("`{name}` needs an argument"))
    } else {
        Ok(rest)
    }
}

fn position(name: &str, rest: &str) -> Result<usize, String> {
    match required(name, rest)?.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("`{name}` needs a positive number, got `{rest}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn arguments_keep_inner_spaces() {
        assert_eq!(
            parse_command("query  super game "),
            Ok(Some(Command::Query("super game".to_string())))
        );
        assert_eq!(
            parse_command("html ./my listing.html"),
            Ok(Some(Command::LoadHtml(PathBuf::from("./my listing.html"))))
        );
    }

    #[test]
    fn query_without_text_clears() {
        assert_eq!(parse_command("query"), Ok(Some(Command::Query(String::new()))));
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(parse_command("toggle 3"), Ok(Some(Command::Toggle(3))));
        assert!(parse_command("toggle 0").is_err());
        assert!(parse_command("remove x").is_err());
        assert!(parse_command("toggle").is_err());
    }

    #[test]
    fn facet_ids_are_lowercased() {
        assert_eq!(
            parse_command("FACET No-Demo"),
            Ok(Some(Command::Facet("no-demo".to_string())))
        );
    }

    #[test]
    fn unknown_commands_are_reported() {
        let err = parse_command("frobnicate now").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
