use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::traits::CommandStream;
use crate::domain::{Command, Error};

/// Reads a session script: one command per CSV row, unused columns left
/// empty. The external format gate (digit-only account numbers, 4-digit
/// PINs, amount shapes) is assumed to have run before the script reached us;
/// the engine re-checks the invariants that matter for correctness.
pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Result<Self, Error> {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Ok(Self { reader: Some(rdr) })
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    op: String,
    account: Option<String>,
    holder: Option<String>,
    pin: Option<String>,
    new_pin: Option<String>,
    confirm_pin: Option<String>,
    amount: Option<Decimal>,
}

impl TryFrom<CsvRow> for Command {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let op = row.op.trim().to_ascii_lowercase();

        fn require<T>(field: Option<T>, op: &str, name: &str) -> Result<T, Error> {
            field.ok_or_else(|| Error::Ingestion(format!("'{}' requires a '{}' column", op, name)))
        }

        let cmd = match op.as_str() {
            "create" => Command::Create {
                number: require(row.account, &op, "account")?,
                holder: require(row.holder, &op, "holder")?,
                pin: require(row.pin, &op, "pin")?,
                initial_balance: row.amount.unwrap_or(Decimal::ZERO),
            },
            "login" => Command::Login {
                number: require(row.account, &op, "account")?,
                pin: require(row.pin, &op, "pin")?,
            },
            "logout" => Command::Logout,
            "deposit" => Command::Deposit {
                amount: require(row.amount, &op, "amount")?,
            },
            "withdraw" => Command::Withdraw {
                amount: require(row.amount, &op, "amount")?,
            },
            "change_pin" => Command::ChangePin {
                current: require(row.pin, &op, "pin")?,
                new: require(row.new_pin, &op, "new_pin")?,
                confirm: require(row.confirm_pin, &op, "confirm_pin")?,
            },
            "balance" => Command::Balance,
            "statement" => Command::Statement,
            "list" => Command::ListAccounts,
            "delete" => Command::DeleteAccount {
                number: require(row.account, &op, "account")?,
            },
            other => {
                return Err(Error::Ingestion(format!("Invalid command: {}", other)));
            }
        };

        Ok(cmd)
    }
}

impl<R: Read + Send + 'static> CommandStream for CsvReader<R> {
    type CmdStream = Pin<Box<dyn Stream<Item = Result<Command, Error>> + Send>>;

    fn stream(&mut self) -> Self::CmdStream {
        // Take ownership of the reader so the iterator we build owns all
        // data and is 'static.
        let reader = match self.reader.take() {
            Some(r) => r,
            None => {
                // Already consumed; return an empty stream.
                return Box::pin(stream::iter(Vec::<Result<Command, Error>>::new()));
            }
        };

        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => Command::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use rust_decimal::Decimal;

    use super::CsvReader;
    use crate::domain::{Command, CommandStream, Error};

    async fn parse(script: &str) -> Vec<Result<Command, Error>> {
        let mut reader =
            CsvReader::new(std::io::Cursor::new(script.as_bytes().to_vec())).unwrap();
        reader.stream().collect().await
    }

    #[tokio::test]
    async fn parses_session_commands() {
        let script = "\
op,account,holder,pin,new_pin,confirm_pin,amount
login,123456789,,1234,,,
deposit,,,,,,700.00
change_pin,,,1234,5678,5678,
logout,,,,,,
";
        let commands = parse(script).await;
        assert_eq!(commands.len(), 4);
        assert!(matches!(
            commands[0].as_ref().unwrap(),
            Command::Login { number, pin } if number == "123456789" && pin == "1234"
        ));
        assert!(matches!(
            commands[1].as_ref().unwrap(),
            Command::Deposit { amount } if *amount == Decimal::new(70000, 2)
        ));
        assert!(matches!(
            commands[2].as_ref().unwrap(),
            Command::ChangePin { current, new, confirm }
                if current == "1234" && new == "5678" && confirm == "5678"
        ));
        assert!(matches!(commands[3].as_ref().unwrap(), Command::Logout));
    }

    #[tokio::test]
    async fn unknown_op_and_missing_columns_are_ingestion_errors() {
        let script = "\
op,account,holder,pin,new_pin,confirm_pin,amount
transfer,123456789,,,,,10.00
deposit,,,,,,
";
        let commands = parse(script).await;
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], Err(Error::Ingestion(_))));
        assert!(matches!(commands[1], Err(Error::Ingestion(_))));
    }
}
