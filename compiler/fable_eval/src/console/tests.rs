use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_display_line_appends_newline() {
    let console = BufferConsole::new();
    console.display("a");
    console.display_line("b");
    assert_eq!(console.output(), "ab\n");
}

#[test]
fn buffer_replays_scripted_input_in_order() {
    let console = BufferConsole::new();
    console.push_input("north");
    console.push_input("south");
    assert_eq!(console.wait_for_input(""), "north");
    assert_eq!(console.wait_for_input("> "), "south");
    assert_eq!(console.wait_for_input(""), "");
    assert_eq!(console.output(), "> ");
}

#[test]
fn buffer_clear_discards_output() {
    let console = BufferConsole::new();
    console.display_line("gone");
    console.clear();
    assert_eq!(console.output(), "");
}

#[test]
fn silent_console_discards_everything() {
    let console = silent_console();
    console.display_line("nothing");
    assert_eq!(console.output(), "");
    assert!(!console.push_input("x"));
    assert_eq!(
        console
            .wait_for_input("?")
            .unwrap_or_else(|e| panic!("silent input failed: {e}")),
        ""
    );
}

struct Recorder {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Console for Recorder {
    fn display(&self, text: &str) {
        self.lines.lock().push(format!("display:{text}"));
    }

    fn display_line(&self, text: &str) {
        self.lines.lock().push(format!("line:{text}"));
    }

    fn wait_for_input(&self, prompt: &str) -> io::Result<String> {
        self.lines.lock().push(format!("wait:{prompt}"));
        Ok("yes".to_string())
    }
}

#[test]
fn host_console_receives_calls() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let console = host_console(Recorder {
        lines: Arc::clone(&lines),
    });

    console.display("x");
    console.display_line("y");
    let answer = console
        .wait_for_input("ready?")
        .unwrap_or_else(|e| panic!("host input failed: {e}"));

    assert_eq!(answer, "yes");
    assert_eq!(
        *lines.lock(),
        vec!["display:x", "line:y", "wait:ready?"]
    );
    assert_eq!(console.output(), "");
}
