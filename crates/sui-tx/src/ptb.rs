//! Programmable transaction blocks.
//!
//! [`ProgrammableTransaction::to_json`] emits version 2 of the serialized transaction data Sui
//! wallets load: sender, expiration and gas data around a list of inputs referenced by index
//! from a list of commands. Gas budget, price and payment are left for the wallet to fill.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use byield_primitives::SuiAddress;
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_with::{serde_as, DisplayFromStr};

use crate::{bcs, SuiTxError};

/// Most inputs a single programmable transaction may carry.
pub const MAX_INPUTS: usize = 2048;

/// Most commands a single programmable transaction may carry.
pub const MAX_COMMANDS: usize = 1024;

/// Version of the serialized transaction data layout.
const TRANSACTION_DATA_VERSION: u8 = 2;

/// Reference to a value inside the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    /// The coin paying for gas.
    GasCoin,
    Input(u16),
    Result(u16),
    /// The `n`th value returned by a command that returns several.
    NestedResult(u16, u16),
}

impl Serialize for Argument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Argument::GasCoin => map.serialize_entry("GasCoin", &true)?,
            Argument::Input(idx) => map.serialize_entry("Input", idx)?,
            Argument::Result(idx) => map.serialize_entry("Result", idx)?,
            Argument::NestedResult(cmd, idx) => map.serialize_entry("NestedResult", &(cmd, idx))?,
        }
        map.end()
    }
}

/// A pure Move value, BCS encoded on serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PureValue {
    U64(u64),
    Bytes(Vec<u8>),
}

impl PureValue {
    pub fn to_bcs(&self) -> Vec<u8> {
        match self {
            PureValue::U64(v) => v.to_le_bytes().to_vec(),
            PureValue::Bytes(data) => bcs::bytes(data),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub object_id: SuiAddress,
    #[serde_as(as = "DisplayFromStr")]
    pub version: u64,
    pub digest: String,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ObjectArg {
    #[serde(rename = "ImmOrOwnedObject")]
    ImmOrOwned(ObjectRef),

    #[serde(rename = "SharedObject", rename_all = "camelCase")]
    Shared {
        object_id: SuiAddress,
        #[serde_as(as = "DisplayFromStr")]
        initial_shared_version: u64,
        mutable: bool,
    },
}

impl ObjectArg {
    /// The system clock at `0x6`.
    pub fn clock() -> Self {
        let mut id = [0u8; 32];
        id[31] = 6;
        ObjectArg::Shared {
            object_id: SuiAddress::new(id),
            initial_shared_version: 1,
            mutable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CallArg {
    Pure {
        #[serde(serialize_with = "serialize_pure")]
        bytes: PureValue,
    },
    Object(ObjectArg),
    /// Object the wallet resolves to its current version and ownership.
    #[serde(rename_all = "camelCase")]
    UnresolvedObject { object_id: SuiAddress },
}

fn serialize_pure<S: Serializer>(value: &PureValue, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(value.to_bcs()))
}

/// A fully qualified Move function, `{package}::{module}::{function}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveTarget {
    pub package: SuiAddress,
    pub module: String,
    pub function: String,
}

impl MoveTarget {
    pub fn new(
        package: SuiAddress,
        module: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            package,
            module: module.into(),
            function: function.into(),
        }
    }
}

impl fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCall {
    pub package: SuiAddress,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Command {
    MoveCall(Box<MoveCall>),
    SplitCoins {
        coin: Argument,
        amounts: Vec<Argument>,
    },
    MergeCoins {
        destination: Argument,
        sources: Vec<Argument>,
    },
}

/// An unsigned programmable transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

impl ProgrammableTransaction {
    /// Serialized transaction data for a wallet to complete and sign.
    pub fn to_json(&self, sender: Option<SuiAddress>) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.transaction_data(sender))
    }

    /// Move calls in command order.
    pub fn move_calls(&self) -> impl Iterator<Item = &MoveCall> {
        self.commands.iter().filter_map(|c| match c {
            Command::MoveCall(call) => Some(call.as_ref()),
            _ => None,
        })
    }

    fn transaction_data(&self, sender: Option<SuiAddress>) -> TransactionData<'_> {
        TransactionData {
            version: TRANSACTION_DATA_VERSION,
            sender,
            expiration: NoExpiration,
            gas_data: GasData::default(),
            inputs: &self.inputs,
            commands: &self.commands,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionData<'a> {
    version: u8,
    sender: Option<SuiAddress>,
    expiration: NoExpiration,
    gas_data: GasData,
    inputs: &'a [CallArg],
    commands: &'a [Command],
}

#[derive(Debug)]
struct NoExpiration;

impl Serialize for NoExpiration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("None", &true)?;
        map.end()
    }
}

#[derive(Debug, Default, Serialize)]
struct GasData {
    budget: Option<String>,
    price: Option<String>,
    owner: Option<SuiAddress>,
    payment: Option<Vec<ObjectRef>>,
}

/// Incrementally assembles a [`ProgrammableTransaction`].
///
/// Size limits are checked once in [`TransactionBuilder::finish`].
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pure(&mut self, value: PureValue) -> Argument {
        self.input(CallArg::Pure { bytes: value })
    }

    pub fn object(&mut self, object: ObjectArg) -> Argument {
        self.input(CallArg::Object(object))
    }

    /// Adds an object by id only, leaving version and ownership to the wallet.
    pub fn unresolved_object(&mut self, object_id: SuiAddress) -> Argument {
        self.input(CallArg::UnresolvedObject { object_id })
    }

    /// Splits one new coin of `amount` off `coin`.
    pub fn split_coin(&mut self, coin: Argument, amount: u64) -> Argument {
        let amount = self.pure(PureValue::U64(amount));
        let idx = self.commands.len() as u16;
        self.command(Command::SplitCoins {
            coin,
            amounts: vec![amount],
        });
        Argument::NestedResult(idx, 0)
    }

    pub fn merge_coins(&mut self, destination: Argument, sources: Vec<Argument>) {
        self.command(Command::MergeCoins {
            destination,
            sources,
        });
    }

    pub fn move_call(
        &mut self,
        target: MoveTarget,
        type_arguments: Vec<String>,
        arguments: Vec<Argument>,
    ) -> Argument {
        self.command(Command::MoveCall(Box::new(MoveCall {
            package: target.package,
            module: target.module,
            function: target.function,
            type_arguments,
            arguments,
        })))
    }

    pub fn finish(self) -> Result<ProgrammableTransaction, SuiTxError> {
        if self.inputs.len() > MAX_INPUTS {
            return Err(SuiTxError::TooManyInputs(self.inputs.len()));
        }
        if self.commands.len() > MAX_COMMANDS {
            return Err(SuiTxError::TooManyCommands(self.commands.len()));
        }
        Ok(ProgrammableTransaction {
            inputs: self.inputs,
            commands: self.commands,
        })
    }

    // indices past u16::MAX wrap, but such a transaction is rejected by `finish`
    fn input(&mut self, arg: CallArg) -> Argument {
        self.inputs.push(arg);
        Argument::Input((self.inputs.len() - 1) as u16)
    }

    fn command(&mut self, command: Command) -> Argument {
        self.commands.push(command);
        Argument::Result((self.commands.len() - 1) as u16)
    }
}
