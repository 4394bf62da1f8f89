use super::error::FormulaError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// The name between `<` and `>` delimiters, surrounding whitespace
    /// trimmed. Any character other than `>` may appear in a name.
    Variable(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

impl Token {
    /// Short human-readable form for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Number(v) => v.to_string(),
            Token::Variable(name) => format!("<{}>", name),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::Percent => "%".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

pub fn tokenize(src: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(at, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => { chars.next(); }
            '+' => { chars.next(); tokens.push(Token::Plus); }
            '-' => { chars.next(); tokens.push(Token::Minus); }
            '*' => { chars.next(); tokens.push(Token::Star); }
            '/' => { chars.next(); tokens.push(Token::Slash); }
            '%' => { chars.next(); tokens.push(Token::Percent); }
            '(' => { chars.next(); tokens.push(Token::LParen); }
            ')' => { chars.next(); tokens.push(Token::RParen); }
            '<' => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '>' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(FormulaError::UnterminatedVariable { at });
                }
                tokens.push(Token::Variable(name.trim().to_string()));
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut text = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        text.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::MalformedNumber { text: text.clone() })?;
                tokens.push(Token::Number(value));
            }
            c => return Err(FormulaError::UnexpectedChar { ch: c, at }),
        }
    }

    Ok(tokens)
}
