use super::*;
use crate::kernel::services::ports::ExecOutput;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::sync::Mutex;

fn local() -> CommandInterpreter {
    CommandInterpreter::local(WorkspaceStore::new())
}

fn eval(interpreter: &CommandInterpreter, line: &str, cwd: &str) -> Evaluation {
    interpreter.evaluate_local(line, &WorkingPath::parse(cwd))
}

fn only_line(evaluation: &Evaluation) -> &str {
    assert_eq!(evaluation.lines.len(), 1, "{evaluation:?}");
    &evaluation.lines[0]
}

#[test]
fn missing_arguments_print_usage() {
    let interpreter = local();
    let cases = [
        ("cd", "Usage: cd <folder_name>"),
        ("mkdir", "Usage: mkdir <folder_name>"),
        ("npm install", "Usage: npm install <package_name>"),
        ("npx create-react-app", "Usage: npx create-react-app <app_name>"),
        ("npx create-react-app a b", "Usage: npx create-react-app <app_name>"),
        ("java", "Usage: java <file_name>"),
    ];
    for (line, usage) in cases {
        assert_eq!(only_line(&eval(&interpreter, line, "")), usage, "{line}");
    }
    assert_eq!(interpreter.store().version(), 0);
}

#[test]
fn mkdir_is_root_level_even_inside_a_folder() {
    let interpreter = local();
    eval(&interpreter, "mkdir proj", "");
    let result = eval(&interpreter, "mkdir other", "proj");
    assert_eq!(only_line(&result), "Created directory: other");
    assert_eq!(result.effects, vec![Effect::RefreshTree]);

    let roots: Vec<String> = interpreter
        .store()
        .snapshot()
        .roots
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    assert_eq!(roots, vec!["proj", "other"]);
}

#[test]
fn mkdir_existing_root_reports_collision() {
    let interpreter = local();
    eval(&interpreter, "mkdir proj", "");
    assert_eq!(
        only_line(&eval(&interpreter, "mkdir proj", "")),
        "Already exists: proj"
    );
}

#[test]
fn cd_appends_to_the_path() {
    let interpreter = local();
    eval(&interpreter, "mkdir proj", "");
    let result = eval(&interpreter, "cd proj", "proj");
    assert_eq!(only_line(&result), "Changed directory to proj");
    assert_eq!(
        result.effects,
        vec![Effect::ChangeDirectory(WorkingPath::parse("proj/proj"))]
    );
}

#[test]
fn cd_unknown_folder_keeps_path() {
    let interpreter = local();
    let result = eval(&interpreter, "cd nowhere", "");
    assert_eq!(only_line(&result), "Folder not found: nowhere");
    assert!(result.effects.is_empty());
}

#[test]
fn npm_install_needs_a_current_folder() {
    let interpreter = local();
    assert_eq!(
        only_line(&eval(&interpreter, "npm install react", "")),
        NOT_IN_FOLDER
    );
    assert_eq!(
        only_line(&eval(&interpreter, "npm install react", "ghost")),
        "Folder not found: ghost"
    );
}

#[test]
fn npm_install_targets_root_named_by_last_segment() {
    let interpreter = local();
    eval(&interpreter, "mkdir a", "");
    eval(&interpreter, "mkdir b", "");
    let result = eval(&interpreter, "npm install lodash", "a/b");
    assert_eq!(only_line(&result), "Installed package lodash");

    let snapshot = interpreter.store().snapshot();
    assert!(snapshot.roots[0].files().is_empty());
    assert_eq!(snapshot.roots[1].files()[0].name(), "lodash");
    assert_eq!(snapshot.roots[1].files()[0].content(), "");
}

#[test]
fn create_react_app_scaffolds_app_and_node_modules() {
    let interpreter = local();
    eval(&interpreter, "mkdir proj", "");
    let result = eval(&interpreter, "npx create-react-app web", "proj");
    assert_eq!(only_line(&result), "Created React app: web");

    let snapshot = interpreter.store().snapshot();
    let children = snapshot.roots[0].folders();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].name(), "web");
    assert_eq!(children[0].files().len(), 5);
    assert_eq!(children[1].name(), scaffold::NODE_MODULES);
    assert!(children[1].is_empty());
}

#[test]
fn second_create_react_app_collides_on_node_modules() {
    let interpreter = local();
    eval(&interpreter, "mkdir proj", "");
    eval(&interpreter, "npx create-react-app web", "proj");
    let version = interpreter.store().version();

    let result = eval(&interpreter, "npx create-react-app admin", "proj");
    assert_eq!(only_line(&result), "Already exists: node_modules");
    assert_eq!(interpreter.store().version(), version);
}

#[test]
fn java_runs_only_existing_java_files() {
    let interpreter = local();
    eval(&interpreter, "mkdir proj", "");
    interpreter.store().create_file("proj", "Main.java").unwrap();
    interpreter.store().create_file("proj", "notes.txt").unwrap();

    let result = eval(&interpreter, "java Main.java", "");
    assert_eq!(
        result.lines,
        vec!["Running Main.java...", "Output of Main.java: Hello World!"]
    );
    assert_eq!(
        only_line(&eval(&interpreter, "java notes.txt", "")),
        "File not found: notes.txt"
    );
}

#[test]
fn unknown_commands_are_echoed_back() {
    let interpreter = local();
    assert_eq!(
        only_line(&eval(&interpreter, "  npm run build ", "")),
        "Command not recognized: npm run build"
    );
    assert_eq!(
        only_line(&eval(&interpreter, "CD proj", "")),
        "Command not recognized: CD proj"
    );
    assert!(eval(&interpreter, "   ", "").lines.is_empty());
}

struct StubBridge {
    reply: Result<ExecOutput, ExecError>,
    seen: Mutex<Vec<ExecRequest>>,
}

impl StubBridge {
    fn new(reply: Result<ExecOutput, ExecError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl RemoteExecutionBridge for StubBridge {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn execute(&self, request: ExecRequest) -> Result<ExecOutput, ExecError> {
        self.seen.lock().unwrap().push(request);
        self.reply.clone()
    }
}

struct SlowBridge;

#[async_trait]
impl RemoteExecutionBridge for SlowBridge {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn execute(&self, _request: ExecRequest) -> Result<ExecOutput, ExecError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(ExecOutput::default())
    }
}

#[tokio::test]
async fn remote_output_is_split_into_lines() {
    let bridge = StubBridge::new(Ok(ExecOutput::stdout("a.txt\nb.txt\n")));
    let interpreter =
        CommandInterpreter::remote(WorkspaceStore::new(), bridge.clone(), DEFAULT_REMOTE_TIMEOUT);

    let result = interpreter
        .evaluate("  ls -la ", &WorkingPath::parse("proj/src"))
        .await;
    assert_eq!(result.lines, vec!["a.txt", "b.txt"]);
    assert_eq!(result.effects, vec![Effect::RefreshTree]);

    let seen = bridge.seen.lock().unwrap();
    assert_eq!(
        seen.as_slice(),
        &[ExecRequest {
            command: "ls -la".to_string(),
            current_directory: "proj/src".to_string(),
        }]
    );
    assert_eq!(interpreter.store().version(), 0);
}

#[tokio::test]
async fn remote_new_directory_changes_path() {
    let bridge = StubBridge::new(Ok(ExecOutput {
        stdout: String::new(),
        new_directory: Some("proj/src".to_string()),
    }));
    let interpreter =
        CommandInterpreter::remote(WorkspaceStore::new(), bridge, DEFAULT_REMOTE_TIMEOUT);

    let result = interpreter.evaluate("cd src", &WorkingPath::parse("proj")).await;
    assert!(result.lines.is_empty());
    assert_eq!(
        result.effects,
        vec![
            Effect::ChangeDirectory(WorkingPath::parse("proj/src")),
            Effect::RefreshTree
        ]
    );
}

#[tokio::test]
async fn remote_errors_are_prefixed() {
    let bridge = StubBridge::new(Err(ExecError::Remote("permission denied".to_string())));
    let interpreter =
        CommandInterpreter::remote(WorkspaceStore::new(), bridge, DEFAULT_REMOTE_TIMEOUT);

    let result = interpreter.evaluate("rm -rf /", &WorkingPath::root()).await;
    assert_eq!(result.lines, vec!["Error: permission denied"]);
    assert!(result.effects.is_empty());
}

#[tokio::test(start_paused = true)]
async fn remote_timeout_becomes_an_error_line() {
    let interpreter = CommandInterpreter::remote(
        WorkspaceStore::new(),
        Arc::new(SlowBridge),
        Duration::from_millis(250),
    );

    let result = interpreter.evaluate("sleep 100", &WorkingPath::root()).await;
    assert_eq!(result.lines, vec!["Error: command timed out after 250ms"]);
}
