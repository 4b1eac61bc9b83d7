//! Per-category migration notes embedded into training documents.

use crate::model::Category;

const TOKEN: &str = "\
### Key Differences
1. **Balances**: `mapping(address => uint256)` becomes `Mapping<AccountId, Balance>`.
2. **Errors**: `require(...)` reverts become `Result<T, Error>` with a contract error enum.
3. **Events**: indexed parameters are marked with `#[ink(topic)]`.
4. **Caller**: `msg.sender` becomes `self.env().caller()`.

### Migration Steps
1. Declare the storage struct with `#[ink(storage)]` and replace every `mapping` with `Mapping`.
2. Turn the constructor into `#[ink(constructor)] pub fn new(total_supply: Balance) -> Self`.
3. Mark public functions `#[ink(message)]`; mutating ones take `&mut self`.
4. Define `#[ink::scale_derive(Encode, Decode, TypeInfo)] pub enum Error` and return it instead of reverting.
5. Emit `Transfer`/`Approval` with `self.env().emit_event(...)`.

### Pattern Comparison
- Solidity: `require(balanceOf[msg.sender] >= value, \"insufficient\");`
- ink!: `if from_balance < value { return Err(Error::InsufficientBalance) }`
";

const STORAGE: &str = "\
### Key Differences
1. **State**: contract-level variables move into one `#[ink(storage)]` struct.
2. **Access**: fields are read and written through `self`.
3. **Visibility**: `public` getters are not generated; write an explicit `#[ink(message)]` getter.
4. **Arithmetic**: overflow is not checked implicitly; use `checked_add` / `saturating_add`.

### Migration Steps
1. Move every state variable into the storage struct.
2. Replace the constructor with `#[ink(constructor)]`; add `Default` if a zero state makes sense.
3. Add a getter message for each value the Solidity contract exposed as `public`.
4. Replace `count++` with `self.count = self.count.checked_add(1).ok_or(Error::Overflow)?`.

### Pattern Comparison
- Solidity: `bool public value; function flip() public { value = !value; }`
- ink!: `#[ink(message)] pub fn flip(&mut self) { self.value = !self.value; }`
";

const SECURITY: &str = "\
### Key Differences
1. **Modifiers**: `onlyOwner`-style modifiers become explicit checks at the top of a message.
2. **Value transfer**: `payable` functions are marked `#[ink(message, payable)]`; balances use `self.env().transferred_value()`.
3. **Payouts**: `transfer`/`call{value: ...}` become `self.env().transfer(to, amount)` returning a `Result`.
4. **Reentrancy**: cross-contract reentrancy is denied by default.

### Migration Steps
1. Store owners/approvers as `Vec<AccountId>` or `Mapping<AccountId, ()>`.
2. Replace each modifier with a private `ensure_*` helper returning `Result<(), Error>`.
3. Update state before calling `self.env().transfer(...)` and map its error into the contract error.
4. Use `self.env().block_timestamp()` for deadlines instead of `block.timestamp`.
";

const EVENTS: &str = "\
### Key Differences
1. **Declaration**: `event Foo(address indexed from)` becomes `#[ink(event)] pub struct Foo { #[ink(topic)] from: AccountId }`.
2. **Emission**: `emit Foo(...)` becomes `self.env().emit_event(Foo { ... })`.
3. **Topics**: only fields marked `#[ink(topic)]` are indexed.

### Migration Steps
1. Turn each event into a struct inside the contract module.
2. Mark every formerly `indexed` parameter with `#[ink(topic)]`.
3. Emit from messages or constructors through `self.env()`.
";

const LIFECYCLE: &str = "\
### Key Differences
1. **Termination**: `selfdestruct(payable(owner))` becomes `self.env().terminate_contract(owner)`.
2. **Upgrades**: proxy patterns are replaced by `self.env().set_code_hash(&code_hash)`.
3. **Ownership**: the deployer is captured in the constructor with `Self::env().caller()`.

### Migration Steps
1. Store the owner at construction time.
2. Guard terminate/upgrade messages with an owner check.
3. Keep the storage layout compatible across code hash updates.
";

const ADVANCED: &str = "\
### Key Differences
1. **Calls**: interface calls become `ContractRef` handles or `build_call` with an explicit selector.
2. **Deployment**: `new Other()` becomes instantiating `OtherRef::new().code_hash(hash)` with a salt.
3. **Dependencies**: the callee is a Cargo dependency compiled with the `ink-as-dependency` feature.

### Migration Steps
1. Add the callee crate as a dependency with `features = [\"ink-as-dependency\"]`.
2. Store an `OtherRef` (or its `AccountId`) in the caller's storage.
3. Forward calls through the reference and propagate its `Result`.
";

const GENERIC: &str = "\
### General Guidelines
1. **Storage**: collect state variables into one `#[ink(storage)]` struct.
2. **Functions**: public functions become `#[ink(message)]`, the constructor `#[ink(constructor)]`.
3. **Errors**: replace `require()` with early `return Err(Error::...)`.
4. **Events**: declare with `#[ink(event)]`, emit with `self.env().emit_event()`.
5. **Caller**: use `self.env().caller()` in place of `msg.sender`.

### Common Patterns
- Storage: `#[ink(storage)] pub struct Name { field: Type }`
- Constructor: `#[ink(constructor)] pub fn new() -> Self`
- Message: `#[ink(message)] pub fn get(&self) -> Type`
";

/// Markdown body (without heading) for a category.
pub fn migration_notes(category: Category) -> &'static str {
    match category {
        Category::Token => TOKEN,
        Category::Storage => STORAGE,
        Category::Security => SECURITY,
        Category::Events => EVENTS,
        Category::Lifecycle => LIFECYCLE,
        Category::Advanced => ADVANCED,
        Category::Other => GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_notes_and_other_gets_generic() {
        assert!(migration_notes(Category::Token).contains("Mapping<AccountId, Balance>"));
        assert!(migration_notes(Category::Storage).contains("#[ink(storage)]"));
        assert!(migration_notes(Category::Events).contains("#[ink(topic)]"));
        assert_eq!(migration_notes(Category::Other), GENERIC);
        assert_ne!(migration_notes(Category::Security), GENERIC);
    }
}
