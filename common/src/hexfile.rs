use std::io::{self, BufRead, BufReader, Read, Write};

/// Logisim memory image: a header line followed by whitespace separated hex
/// words, where `N*w` repeats word `w` N times.
#[derive(Clone, Debug)]
pub enum HexFileLine {
    Data(Vec<HexFileData>),
    Comment(String),
}

#[derive(Clone, Debug)]
pub enum HexFileData {
    Word(u16),
    Run(u32, u16),
}

pub struct HexFile {
    pub lines: Vec<HexFileLine>,
}

const WORDS_PER_LINE: usize = 8;

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

impl HexFile {
    pub const fn header() -> &'static str {
        "v2.0 raw"
    }

    /// Collapses repeated words into runs.
    pub fn from_words(words: &[u16]) -> HexFile {
        let mut data = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let word = words[i];
            let count = words[i..].iter().take_while(|w| **w == word).count();
            data.push(if count > 1 {
                HexFileData::Run(count as u32, word)
            } else {
                HexFileData::Word(word)
            });
            i += count;
        }

        HexFile {
            lines: data
                .chunks(WORDS_PER_LINE)
                .map(|chunk| HexFileLine::Data(chunk.to_vec()))
                .collect(),
        }
    }

    pub fn words(&self) -> Vec<u16> {
        let mut words = Vec::new();
        for line in &self.lines {
            match line {
                HexFileLine::Comment(_) => {},
                HexFileLine::Data(data) => {
                    for data in data {
                        match data {
                            HexFileData::Word(w) => words.push(*w),
                            HexFileData::Run(count, w) => {
                                for _ in 0..*count {
                                    words.push(*w);
                                }
                            }
                        }
                    }
                }
            }
        }

        words
    }

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{}", HexFile::header())?;
        for line in &self.lines {
            match line {
                HexFileLine::Comment(comment) => writeln!(w, "# {}", comment)?,
                HexFileLine::Data(data) => {
                    let blocks: Vec<String> = data
                        .iter()
                        .map(|d| match d {
                            HexFileData::Word(word) => format!("{:04x}", word),
                            HexFileData::Run(count, word) => format!("{}*{:04x}", count, word),
                        })
                        .collect();
                    writeln!(w, "{}", blocks.join(" "))?;
                }
            }
        }
        Ok(())
    }

    pub fn read<R: Read>(r: R) -> Result<HexFile, io::Error> {
        let file = BufReader::new(r);
        let mut lines = file.lines();

        let header = lines.next().transpose()?;
        if header.as_deref().map(str::trim) != Some(HexFile::header()) {
            return Err(invalid(format!("missing '{}' header", HexFile::header())));
        }

        let mut parsed = Vec::new();

        for line in lines {
            let line = line?;
            let line = line.trim();

            if let Some(comment) = line.strip_prefix('#') {
                parsed.push(HexFileLine::Comment(comment.trim().to_string()));
                continue;
            }

            let mut data = Vec::new();

            for block in line.split_whitespace() {
                let parse_word = |s: &str| {
                    u16::from_str_radix(s, 16).map_err(|e| invalid(format!("'{}': {}", block, e)))
                };

                data.push(match block.split_once('*') {
                    Some((count, word)) => HexFileData::Run(
                        count.parse().map_err(|e| invalid(format!("'{}': {}", block, e)))?,
                        parse_word(word)?),
                    None => HexFileData::Word(parse_word(block)?),
                });
            }

            parsed.push(HexFileLine::Data(data));
        }

        Ok(HexFile {
            lines: parsed,
        })
    }
}
