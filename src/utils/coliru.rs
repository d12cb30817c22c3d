//! Remote compilation through Coliru.

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

pub const COLIRU_API: &str = "http://coliru.stacked-crooked.com";

const CPP: &str = "g++ -std=c++1z -O2 -Wall -Wextra -pedantic -pthread main.cpp -lstdc++fs && ./a.out";
const CPP_ALIASES: [&str; 6] = ["cpp", "cc", "h", "c++", "h++", "hpp"];

#[derive(Error, Debug)]
pub enum ColiruError {
    #[error("Missing code block. Please use the following markdown\n\\`\\`\\`language\ncode here\n\\`\\`\\`")]
    MissingCodeBlock,

    #[error("Unknown language to compile for: {0}")]
    UnknownLanguage(String),

    #[error("Could not find a language to compile with.")]
    NoLanguage,

    #[error("API communication failure: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Coliru did not respond in time.")]
    Status(reqwest::StatusCode),
}

/// A fenced code block resolved to the shell command that builds and runs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    #[serde(rename = "cmd")]
    pub command: String,
    #[serde(rename = "src")]
    pub source: String,
}

impl CodeBlock {
    /// Parses "```lang\ncode```".
    pub fn parse(argument: &str) -> Result<Self, ColiruError> {
        let (fence, code) = argument
            .trim()
            .split_once('\n')
            .ok_or(ColiruError::MissingCodeBlock)?;
        let language = fence
            .strip_prefix("```")
            .ok_or(ColiruError::MissingCodeBlock)?
            .trim()
            .to_lowercase();
        if !code.trim_end().ends_with("```") {
            return Err(ColiruError::MissingCodeBlock);
        }

        Ok(Self {
            command: command_for(&language)?.to_string(),
            source: code.trim_end().trim_end_matches('`').replace("```", ""),
        })
    }
}

fn command_for(language: &str) -> Result<&'static str, ColiruError> {
    match language {
        "" => Err(ColiruError::NoLanguage),
        lang if CPP_ALIASES.contains(&lang) => Ok(CPP),
        "c" => Ok("mv main.cpp main.c && gcc -std=c11 -O2 -Wall -Wextra -pedantic main.c && ./a.out"),
        "py" | "python" => Ok("python3 main.cpp"),
        "haskell" => Ok("runhaskell main.cpp"),
        other => Err(ColiruError::UnknownLanguage(other.to_string())),
    }
}

/// Compiles and runs `block`, returning the combined output.
pub async fn compile(client: &Client, base_url: &str, block: &CodeBlock) -> Result<String, ColiruError> {
    let response = client
        .post(format!("{base_url}/compile"))
        .json(block)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ColiruError::Status(response.status()));
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_python_block() {
        let block = CodeBlock::parse("```py\nprint('hi')\n```").unwrap();
        assert_eq!(block.command, "python3 main.cpp");
        assert_eq!(block.source, "print('hi')\n");
    }

    #[test_case("cpp" ; "cpp")]
    #[test_case("c++" ; "cxx")]
    #[test_case("HPP" ; "uppercase alias")]
    fn test_cpp_aliases(language: &str) {
        let block = CodeBlock::parse(&format!("```{language}\nint main() {{}}\n```")).unwrap();
        assert_eq!(block.command, CPP);
    }

    #[test]
    fn test_parse_errors() {
        assert_matches!(CodeBlock::parse("print(1)"), Err(ColiruError::MissingCodeBlock));
        assert_matches!(CodeBlock::parse("```py\nprint(1)"), Err(ColiruError::MissingCodeBlock));
        assert_matches!(CodeBlock::parse("```\nprint(1)\n```"), Err(ColiruError::NoLanguage));
        assert_matches!(
            CodeBlock::parse("```cobol\nDISPLAY 'x'\n```"),
            Err(ColiruError::UnknownLanguage(lang)) if lang == "cobol"
        );
    }

    #[tokio::test]
    async fn test_compile_posts_command_and_source() {
        let server = MockServer::start().await;
        let block = CodeBlock::parse("```haskell\nmain = print 1\n```").unwrap();

        Mock::given(method("POST"))
            .and(path("/compile"))
            .and(body_json(serde_json::json!({
                "cmd": "runhaskell main.cpp",
                "src": "main = print 1\n",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("1\n"))
            .mount(&server)
            .await;

        let output = compile(&Client::new(), &server.uri(), &block).await.unwrap();
        assert_eq!(output, "1\n");
    }

    #[tokio::test]
    async fn test_compile_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(504))
            .mount(&server)
            .await;

        let block = CodeBlock::parse("```py\n1\n```").unwrap();
        let result = compile(&Client::new(), &server.uri(), &block).await;
        assert_matches!(result, Err(ColiruError::Status(_)));
    }
}
