//! Help text shown by the `help` command

pub const HELP: &str = "\
classified - a password protected, row editable text document

Usage: classified [OPTIONS] [COMMAND [TARGET [DATA...]]]

COMMANDS:
  Data modifying commands:
    add         add DATA to TARGET
    modify      modify the current content of TARGET
    replace     replace existing content of TARGET with DATA
    delete      delete TARGET and its content
    show        show the content of TARGET

  Other commands:
    new         create an empty document. Asks for a location if none is given as TARGET
    help        show this help message
    exit        save and exit, same as leaving the command empty
    discard     quit without saving, same as pressing ctrl+c
    password    change the password, applied when the document is saved
    log         show the most recent audit log entries, TARGET is how many (default 20)
    debug       put 'debug' before COMMAND to keep the screen from being cleared

TARGETS:
  text          all of the text
  row ID        one row of text. ID is a row number or the start of a row,
                for example 'row 5' or 'row the'

Use '' or \"\" as DATA to mean an empty row.

Commands given on the command line run once after the password is entered,
then the document is saved and the program exits, for example:

  classified show row email

Examples:
  add text This is classified      append the row 'This is classified'
  add row 1 first                  insert 'first' before row 1
  delete row 1                     delete the first row
  show row email                   show every row starting with 'email'
  modify row email                 edit the row starting with 'email'
  replace row 2 new content        overwrite row 2
  delete text                      delete all rows
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_verb() {
        for verb in [
            "add", "modify", "replace", "delete", "show", "new", "help", "exit", "discard",
            "password", "log",
        ] {
            assert!(HELP.contains(&format!("    {}", verb)), "missing {}", verb);
        }
    }
}
