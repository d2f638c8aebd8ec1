//! 命令解析：把一行输入分类为语义命令
//!
//! 按空白切分，按首个（或前两个）记号分类；参数缺失的命令仍然产生对应变体，
//! 由解释器输出用法提示。

use compact_str::CompactString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    ChangeDir { name: Option<CompactString> },
    MakeDir { name: Option<CompactString> },
    NpmInstall { package: Option<CompactString> },
    CreateReactApp { app: Option<CompactString> },
    Java { file: Option<CompactString> },
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let mut tokens = line.split_ascii_whitespace();
        let Some(head) = tokens.next() else {
            return ShellCommand::Empty;
        };

        match head {
            "cd" => ShellCommand::ChangeDir {
                name: tokens.next().map(CompactString::from),
            },
            "mkdir" => ShellCommand::MakeDir {
                name: tokens.next().map(CompactString::from),
            },
            "java" => ShellCommand::Java {
                file: tokens.next().map(CompactString::from),
            },
            "npm" if tokens.next() == Some("install") => ShellCommand::NpmInstall {
                package: tokens.next().map(CompactString::from),
            },
            "npx" if tokens.next() == Some("create-react-app") => {
                let rest: Vec<&str> = tokens.collect();
                // 必须恰好一个应用名
                let app = match rest.as_slice() {
                    [app] => Some(CompactString::from(*app)),
                    _ => None,
                };
                ShellCommand::CreateReactApp { app }
            }
            _ => ShellCommand::Unknown(line.to_string()),
        }
    }

    pub fn usage(&self) -> Option<&'static str> {
        match self {
            ShellCommand::ChangeDir { .. } => Some("Usage: cd <folder_name>"),
            ShellCommand::MakeDir { .. } => Some("Usage: mkdir <folder_name>"),
            ShellCommand::NpmInstall { .. } => Some("Usage: npm install <package_name>"),
            ShellCommand::CreateReactApp { .. } => Some("Usage: npx create-react-app <app_name>"),
            ShellCommand::Java { .. } => Some("Usage: java <file_name>"),
            ShellCommand::Empty | ShellCommand::Unknown(_) => None,
        }
    }
}
