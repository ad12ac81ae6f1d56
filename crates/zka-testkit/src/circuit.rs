// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_r1cs_std::{alloc::AllocVar, eq::EqGadget, fields::fp::FpVar};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use ark_snark::SNARK;
use ark_std::rand::{CryptoRng, RngCore};

/// "I know `password` such that `password · salt == password_hash`", bound to
/// an identity tag so a proof for one user cannot be replayed for another.
///
/// Public inputs, in order: identity, salt, password_hash, binding.
#[derive(Clone)]
pub struct LoginCircuit {
    pub identity: Option<Fr>,
    pub salt: Option<Fr>,
    pub password: Option<Fr>,
}

impl LoginCircuit {
    pub fn empty() -> Self {
        Self {
            identity: None,
            salt: None,
            password: None,
        }
    }
}

impl ConstraintSynthesizer<Fr> for LoginCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let identity = self.identity;
        let salt = self.salt;
        let password = self.password;
        let native = || -> Result<PublicInputs, SynthesisError> {
            Ok(PublicInputs::compute(
                identity.ok_or(SynthesisError::AssignmentMissing)?,
                salt.ok_or(SynthesisError::AssignmentMissing)?,
                password.ok_or(SynthesisError::AssignmentMissing)?,
            ))
        };

        let identity_var = FpVar::new_input(cs.clone(), || Ok(native()?.identity))?;
        let salt_var = FpVar::new_input(cs.clone(), || Ok(native()?.salt))?;
        let hash_var = FpVar::new_input(cs.clone(), || Ok(native()?.password_hash))?;
        let binding_var = FpVar::new_input(cs.clone(), || Ok(native()?.binding))?;

        let password_var =
            FpVar::new_witness(cs, || password.ok_or(SynthesisError::AssignmentMissing))?;

        (&password_var * &salt_var).enforce_equal(&hash_var)?;
        (&identity_var * &hash_var).enforce_equal(&binding_var)?;

        Ok(())
    }
}

/// Public signals of a login proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicInputs {
    pub identity: Fr,
    pub salt: Fr,
    pub password_hash: Fr,
    pub binding: Fr,
}

impl PublicInputs {
    pub fn compute(identity: Fr, salt: Fr, password: Fr) -> Self {
        let password_hash = password * salt;
        Self {
            identity,
            salt,
            password_hash,
            binding: identity * password_hash,
        }
    }

    pub fn to_vec(&self) -> Vec<Fr> {
        vec![self.identity, self.salt, self.password_hash, self.binding]
    }
}

/// Run a circuit-specific Groth16 setup for the login circuit.
pub fn setup<R: RngCore + CryptoRng>(rng: &mut R) -> (ProvingKey<Bn254>, VerifyingKey<Bn254>) {
    Groth16::<Bn254>::circuit_specific_setup(LoginCircuit::empty(), rng).expect("setup failed")
}

pub fn prove<R: RngCore + CryptoRng>(
    pk: &ProvingKey<Bn254>,
    identity: Fr,
    salt: Fr,
    password: Fr,
    rng: &mut R,
) -> (Proof<Bn254>, PublicInputs) {
    let circuit = LoginCircuit {
        identity: Some(identity),
        salt: Some(salt),
        password: Some(password),
    };
    let proof = Groth16::<Bn254>::prove(pk, circuit, rng).expect("proving failed");
    (proof, PublicInputs::compute(identity, salt, password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_relations::r1cs::ConstraintSystem;

    #[test]
    fn satisfied_with_correct_password() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        LoginCircuit {
            identity: Some(Fr::from(11u64)),
            salt: Some(Fr::from(3u64)),
            password: Some(Fr::from(42u64)),
        }
        .generate_constraints(cs.clone())
        .unwrap();
        assert!(cs.is_satisfied().unwrap());
        assert_eq!(cs.num_instance_variables(), 5);
    }

    #[test]
    fn public_inputs_follow_circuit() {
        let pi = PublicInputs::compute(Fr::from(2u64), Fr::from(3u64), Fr::from(5u64));
        assert_eq!(pi.password_hash, Fr::from(15u64));
        assert_eq!(pi.binding, Fr::from(30u64));
        assert_eq!(pi.to_vec().len(), 4);
    }
}
